#![deny(missing_docs)]

//! BitGo SDK - Complete SDK.
//!
//! Re-exports the shared transport and both API versions for convenient
//! single-crate usage.

pub use bitgo_core as transport;
pub use bitgo_v1 as v1;
pub use bitgo_v2 as v2;

pub use bitgo_core::{ApiVersion, BitGoConfig, BitGoError, Environment, WalletDefaults};
