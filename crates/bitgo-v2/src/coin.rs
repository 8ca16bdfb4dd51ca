//! Coins supported by the v2 API.

use std::fmt;
use std::str::FromStr;

use bitgo_core::BitGoError;
use serde::{Deserialize, Serialize};

/// A chain/network code embedded in every v2 path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coin {
    /// Bitcoin.
    #[default]
    Btc,
    /// Bitcoin testnet3.
    Tbtc,
    /// Ethereum.
    Eth,
    /// Ethereum Kovan testnet.
    Teth,
    /// Ripple.
    Xrp,
    /// Ripple testnet.
    Txrp,
    /// Litecoin.
    Ltc,
    /// Litecoin testnet4.
    Tltc,
    /// Royal Mint Gold.
    Rmg,
    /// Royal Mint Gold testnet.
    Trmg,
}

impl Coin {
    /// Every supported coin.
    pub const ALL: [Coin; 10] = [
        Coin::Btc,
        Coin::Tbtc,
        Coin::Eth,
        Coin::Teth,
        Coin::Xrp,
        Coin::Txrp,
        Coin::Ltc,
        Coin::Tltc,
        Coin::Rmg,
        Coin::Trmg,
    ];

    /// The code used in URLs (e.g. `tbtc`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Btc => "btc",
            Self::Tbtc => "tbtc",
            Self::Eth => "eth",
            Self::Teth => "teth",
            Self::Xrp => "xrp",
            Self::Txrp => "txrp",
            Self::Ltc => "ltc",
            Self::Tltc => "tltc",
            Self::Rmg => "rmg",
            Self::Trmg => "trmg",
        }
    }

    /// Whether this coin is a test network.
    pub fn is_testnet(&self) -> bool {
        self.as_str().starts_with('t')
    }

    /// Comma-separated list of the accepted codes.
    pub fn valid_codes() -> String {
        Self::ALL
            .iter()
            .map(Coin::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Coin {
    type Err = BitGoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|coin| coin.as_str() == s)
            .ok_or_else(|| BitGoError::InvalidCoin {
                coin: s.to_string(),
                valid: Self::valid_codes(),
            })
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Anything a v2 call accepts as its coin: a [`Coin`] or a code to
/// validate.
pub trait IntoCoin {
    /// Validate and convert.
    fn into_coin(self) -> Result<Coin, BitGoError>;
}

impl IntoCoin for Coin {
    fn into_coin(self) -> Result<Coin, BitGoError> {
        Ok(self)
    }
}

impl IntoCoin for &str {
    fn into_coin(self) -> Result<Coin, BitGoError> {
        self.parse()
    }
}

impl IntoCoin for &String {
    fn into_coin(self) -> Result<Coin, BitGoError> {
        self.parse()
    }
}

impl IntoCoin for String {
    fn into_coin(self) -> Result<Coin, BitGoError> {
        self.parse()
    }
}
