#![deny(missing_docs)]

//! # bitgo-v1
//!
//! Client for the BitGo v1 wallet API (`/api/v1`).
//!
//! # Example
//!
//! ```no_run
//! use bitgo_v1::{BitGoV1, Environment};
//!
//! # async fn example() -> Result<(), bitgo_v1::BitGoError> {
//! let mut client = BitGoV1::for_env(Environment::Test);
//!
//! let login = client.user().login("me@example.com", "password", "0000000").await?;
//! if let Some(token) = login["access_token"].as_str() {
//!     client.set_session_token(token);
//! }
//!
//! let wallets = client.list_wallets().await?;
//! println!("{wallets}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod types;


pub use bitgo_core::{ApiVersion, BitGoConfig, BitGoError, Environment, UserApi, WalletDefaults};
pub use client::BitGoV1;
pub use types::{
    AddWalletOptions, BuildTransactionOptions, KeychainXpub, Recipient, SendCoinsOptions,
    SendManyOptions, SignTransactionOptions,
};
