#![deny(missing_docs)]

//! # bitgo-core
//!
//! Transport and shared types for the BitGo wallet REST API.
//!
//! [`Transport::call`] executes one [`Endpoint`]: it serializes the params
//! as a JSON body, attaches the bearer token when asked to, and turns
//! undecodable bodies and `{"error": ...}` responses into [`BitGoError`]s.
//! The versioned clients in `bitgo-v1` and `bitgo-v2` are thin mappings
//! onto this call.
//!
//! # Example
//!
//! ```no_run
//! use bitgo_core::{Endpoint, Transport};
//!
//! # async fn example() -> Result<(), bitgo_core::BitGoError> {
//! let mut transport = Transport::new("https://test.bitgo.com/api/v1");
//! transport.set_session_token("v2x...");
//!
//! let session = transport.call_json(Endpoint::get("/user/session")).await?;
//! println!("{session}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod types;
pub mod user;

#[cfg(test)]
mod tests;

pub use client::Transport;
pub use error::BitGoError;
pub use types::{
    seed_bytes, to_params, ApiResponse, ApiVersion, BitGoConfig, Endpoint, Environment, Params,
    WalletDefaults,
};
pub use user::UserApi;
