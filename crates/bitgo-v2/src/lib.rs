#![deny(missing_docs)]

//! # bitgo-v2
//!
//! Client for the BitGo v2 wallet API (`/api/v2/{coin}/...`).
//!
//! Coin arguments accept either a [`Coin`] or a string code; strings are
//! checked against the supported set before any request is made.
//!
//! # Example
//!
//! ```no_run
//! use bitgo_v2::{ApiVersion, BitGoConfig, BitGoV2, Coin, Environment};
//!
//! # async fn example() -> Result<(), bitgo_v2::BitGoError> {
//! let config = BitGoConfig::for_env(ApiVersion::V2, Environment::Test)
//!     .with_session_token("v2x...")
//!     .with_wallet_id("585c51a5df8380e0e3082e46");
//! let client = BitGoV2::new(config);
//!
//! let wallet = client.get_wallet(Coin::Tbtc, None).await?;
//! let address = client.create_address("tbtc", None).await?;
//! println!("{wallet} {address}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod coin;
pub mod types;


pub use bitgo_core::{ApiVersion, BitGoConfig, BitGoError, Environment, UserApi, WalletDefaults};
pub use client::BitGoV2;
pub use coin::{Coin, IntoCoin};
pub use types::{AddWalletOptions, FeeOptions, Recipient, SendCoinsOptions, SendManyOptions};
