//! Error types for BitGo API operations.

use serde_json::Value;

/// Errors that can occur when interacting with the BitGo API.
///
/// Configuration errors (`UnsupportedMethod`, `InvalidCoin`,
/// `MissingArgument`, `InvalidArgument`, `Serialization`) are raised before
/// any request is sent.
#[derive(Debug, thiserror::Error)]
pub enum BitGoError {
    /// The endpoint uses an HTTP verb other than GET, POST, PUT or DELETE.
    #[error("unsupported request method: {0}")]
    UnsupportedMethod(String),

    /// The coin code is not one of the supported coins.
    #[error("invalid coin `{coin}`, must be one of {valid}")]
    InvalidCoin {
        /// The rejected coin code.
        coin: String,
        /// Comma-separated list of accepted coin codes.
        valid: String,
    },

    /// A required argument was supplied neither by the call nor by the
    /// client defaults.
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    /// An argument was supplied but has an unusable value.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Request parameters could not be turned into a JSON object.
    #[error("serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("error parsing BitGo response as JSON: {source}, response body: {body}")]
    Decode {
        /// The underlying parse failure.
        #[source]
        source: serde_json::Error,
        /// Raw response body.
        body: String,
    },

    /// BitGo answered with an `error` field.
    #[error("BitGo error: {}", vendor_message(.0))]
    Vendor(Value),
}

impl BitGoError {
    /// Returns `true` for errors detected before any network I/O.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedMethod(_)
                | Self::InvalidCoin { .. }
                | Self::MissingArgument(_)
                | Self::InvalidArgument { .. }
                | Self::Serialization(_)
        )
    }

    /// Returns `true` if BitGo reported the failure in the response body.
    pub fn is_vendor(&self) -> bool {
        matches!(self, Self::Vendor(_))
    }

    /// The message of a vendor error, if this is one.
    pub fn vendor_message(&self) -> Option<String> {
        match self {
            Self::Vendor(value) => Some(vendor_message(value)),
            _ => None,
        }
    }
}

fn vendor_message(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
