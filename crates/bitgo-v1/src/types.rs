//! V1 request option types.
//!
//! Optional fields are skipped when unset, so they never reach BitGo as
//! `null`.

use serde::Serialize;
use serde_json::Value;

/// A keychain reference used when creating a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeychainXpub {
    /// Extended public key.
    pub xpub: String,
}

impl KeychainXpub {
    /// Wrap an xpub.
    pub fn new(xpub: impl Into<String>) -> Self {
        Self { xpub: xpub.into() }
    }
}

/// Parameters for creating a 2-of-3 wallet from registered keychains.
#[derive(Debug, Clone, Serialize)]
pub struct AddWalletOptions {
    /// Wallet label.
    pub label: String,
    /// Signatures required to spend (BitGo only accepts 2).
    pub m: u8,
    /// Number of keys (BitGo only accepts 3).
    pub n: u8,
    /// User, backup and BitGo keychains, in that order.
    pub keychains: Vec<KeychainXpub>,
    /// Enterprise to create the wallet under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enterprise: Option<String>,
}

impl AddWalletOptions {
    /// 2-of-3 wallet options; the last keychain must be the BitGo key.
    pub fn two_of_three(label: impl Into<String>, keychains: Vec<KeychainXpub>) -> Self {
        Self {
            label: label.into(),
            m: 2,
            n: 3,
            keychains,
            enterprise: None,
        }
    }
}

/// A single payment output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipient {
    /// Destination address.
    pub address: String,
    /// Amount in satoshis.
    pub amount: u64,
}

impl Recipient {
    /// Pay `amount` satoshis to `address`.
    pub fn new(address: impl Into<String>, amount: u64) -> Self {
        Self {
            address: address.into(),
            amount,
        }
    }
}

/// Parameters for sending to a single address.
///
/// `wallet_id` and `wallet_passphrase` fall back to the client defaults.
#[derive(Debug, Clone, Default)]
pub struct SendCoinsOptions {
    /// Source wallet.
    pub wallet_id: Option<String>,
    /// Destination address.
    pub address: String,
    /// Amount in satoshis.
    pub amount: u64,
    /// Passphrase decrypting the user key.
    pub wallet_passphrase: Option<String>,
    /// Only spend unspents with at least this many confirmations.
    pub min_confirmations: Option<u32>,
    /// Fixed fee in satoshis.
    pub fee: Option<u64>,
}

/// Parameters for sending to several addresses at once.
#[derive(Debug, Clone, Default)]
pub struct SendManyOptions {
    /// Outputs to create.
    pub recipients: Vec<Recipient>,
    /// Passphrase decrypting the user key; falls back to the default.
    pub wallet_passphrase: Option<String>,
    /// Only spend unspents with at least this many confirmations.
    pub min_confirmations: Option<u32>,
    /// Fixed fee in satoshis.
    pub fee: Option<u64>,
}

/// Parameters for building an unsigned transaction through BitGo Express.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTransactionOptions {
    /// Outputs to create.
    pub recipients: Vec<Recipient>,
    /// Only spend unspents with at least this many confirmations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_confirmations: Option<u32>,
    /// Fixed fee in satoshis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<u64>,
}

/// Parameters for signing a built transaction through BitGo Express.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignTransactionOptions {
    /// Unsigned transaction, hex encoded.
    pub transaction_hex: String,
    /// Unspents returned by the build step.
    pub unspents: Vec<Value>,
    /// Decrypted user keychain (`xprv` included).
    pub keychain: Value,
}
