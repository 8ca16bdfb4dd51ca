//! V2 request option types.

use serde::Serialize;

/// Parameters for creating a wallet. BitGo generates whichever keys are not
/// supplied.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWalletOptions {
    /// Human-readable wallet name.
    pub label: String,
    /// Passphrase encrypting the user key.
    pub passphrase: String,
    /// Use this xpub as the user key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_xpub: Option<String>,
    /// Use this xpub as the backup key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_xpub: Option<String>,
    /// Key recovery service that provides and stores the backup key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_xpub_provider: Option<String>,
    /// Enterprise to associate the wallet with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enterprise: Option<String>,
    /// Suppress transaction notifications for this wallet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_transaction_notifications: Option<bool>,
}

impl AddWalletOptions {
    /// Options with only the required fields.
    pub fn new(label: impl Into<String>, passphrase: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            passphrase: passphrase.into(),
            ..Self::default()
        }
    }
}

/// A single payment output. Amounts are strings in base units so values
/// above `u64` (e.g. wei) survive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipient {
    /// Destination address.
    pub address: String,
    /// Amount in the coin's base unit.
    pub amount: String,
}

impl Recipient {
    /// Pay `amount` base units to `address`.
    pub fn new(address: impl Into<String>, amount: impl ToString) -> Self {
        Self {
            address: address.into(),
            amount: amount.to_string(),
        }
    }
}

/// Fee and confirmation settings shared by build and send calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeOptions {
    /// Fee rate in base units per kilobyte.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_rate: Option<u64>,
    /// Only spend unspents with at least this many confirmations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_confirms: Option<u32>,
}

/// Parameters for sending to one address.
#[derive(Debug, Clone, Default)]
pub struct SendCoinsOptions {
    /// Destination address.
    pub address: String,
    /// Amount in base units.
    pub amount: String,
    /// Passphrase decrypting the user key; falls back to the default.
    pub wallet_passphrase: Option<String>,
    /// Fee settings.
    pub fees: FeeOptions,
}

/// Parameters for sending to several addresses.
#[derive(Debug, Clone, Default)]
pub struct SendManyOptions {
    /// Outputs to create.
    pub recipients: Vec<Recipient>,
    /// Passphrase decrypting the user key; falls back to the default.
    pub wallet_passphrase: Option<String>,
    /// Fee settings.
    pub fees: FeeOptions,
}
