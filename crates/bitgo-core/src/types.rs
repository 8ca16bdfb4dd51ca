//! Core data types: environments, client configuration, endpoint
//! descriptors and responses.

use std::fmt;
use std::str::FromStr;

use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::BitGoError;

/// JSON object sent as a request body.
pub type Params = Map<String, Value>;

/// Environment variable selecting the [`Environment`].
pub const ENV_ENVIRONMENT: &str = "BITGO_ENV";
/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "BITGO_BASE_URL";
/// Environment variable holding a long-lived access token.
pub const ENV_ACCESS_TOKEN: &str = "BITGO_ACCESS_TOKEN";
/// Environment variable holding the default wallet id.
pub const ENV_WALLET_ID: &str = "BITGO_WALLET_ID";
/// Environment variable holding the default wallet passphrase.
pub const ENV_WALLET_PASSPHRASE: &str = "BITGO_WALLET_PASSPHRASE";

/// BitGo API version. Selects the URL prefix of every endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// `/api/v1`
    V1,
    /// `/api/v2`, paths scoped by coin.
    V2,
}

impl ApiVersion {
    fn prefix(self) -> &'static str {
        match self {
            Self::V1 => "/api/v1",
            Self::V2 => "/api/v2",
        }
    }
}

/// The BitGo deployment a client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// `https://www.bitgo.com`
    #[default]
    Production,
    /// `https://test.bitgo.com`
    Test,
    /// A local BitGo Express proxy on port 3080.
    Express,
}

impl Environment {
    /// Host part of the base URL, without the API prefix.
    pub fn host(self) -> &'static str {
        match self {
            Self::Production => "https://www.bitgo.com",
            Self::Test => "https://test.bitgo.com",
            Self::Express => "http://127.0.0.1:3080",
        }
    }

    /// Full base URL for the given API version.
    pub fn base_url(self, version: ApiVersion) -> String {
        format!("{}{}", self.host(), version.prefix())
    }
}

impl FromStr for Environment {
    type Err = BitGoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prod" | "production" | "live" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            "express" | "local" => Ok(Self::Express),
            other => Err(BitGoError::InvalidArgument {
                name: "environment",
                reason: format!("unknown environment `{other}`"),
            }),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Production => "production",
            Self::Test => "test",
            Self::Express => "express",
        };
        write!(f, "{s}")
    }
}

/// Values used by wallet-scoped calls that do not pass their own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletDefaults {
    /// Wallet id used when a call passes `None`.
    pub wallet_id: Option<String>,
    /// Wallet passphrase used when a call passes `None`.
    pub wallet_passphrase: Option<String>,
}

impl WalletDefaults {
    /// Picks the explicit wallet id, falling back to the default.
    pub fn wallet_id<'a>(&'a self, explicit: Option<&'a str>) -> Result<&'a str, BitGoError> {
        explicit
            .or(self.wallet_id.as_deref())
            .ok_or(BitGoError::MissingArgument("wallet_id"))
    }

    /// Picks the explicit passphrase, falling back to the default.
    pub fn wallet_passphrase<'a>(
        &'a self,
        explicit: Option<&'a str>,
    ) -> Result<&'a str, BitGoError> {
        explicit
            .or(self.wallet_passphrase.as_deref())
            .ok_or(BitGoError::MissingArgument("wallet_passphrase"))
    }
}

/// Configuration for a BitGo client.
#[derive(Debug, Clone)]
pub struct BitGoConfig {
    /// Base URL every endpoint path is appended to (e.g.
    /// `https://www.bitgo.com/api/v2`).
    pub base_url: String,
    /// Bearer token, if one is already known.
    pub session_token: Option<String>,
    /// Defaults for wallet-scoped calls.
    pub defaults: WalletDefaults,
}

impl BitGoConfig {
    /// Configuration pointing at an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            session_token: None,
            defaults: WalletDefaults::default(),
        }
    }

    /// Configuration for one of the fixed BitGo environments.
    pub fn for_env(version: ApiVersion, environment: Environment) -> Self {
        Self::new(environment.base_url(version))
    }

    /// Reads the configuration from `BITGO_*` environment variables.
    ///
    /// `BITGO_BASE_URL` wins over `BITGO_ENV`; an unset `BITGO_ENV` means
    /// production. A variable that is set but not valid unicode is an error.
    pub fn from_env(version: ApiVersion) -> Result<Self, BitGoError> {
        let environment = match read_env(ENV_ENVIRONMENT)? {
            Some(v) => v.parse()?,
            None => Environment::default(),
        };
        let base_url = read_env(ENV_BASE_URL)?.unwrap_or_else(|| environment.base_url(version));

        Ok(Self {
            base_url,
            session_token: read_env(ENV_ACCESS_TOKEN)?,
            defaults: WalletDefaults {
                wallet_id: read_env(ENV_WALLET_ID)?,
                wallet_passphrase: read_env(ENV_WALLET_PASSPHRASE)?,
            },
        })
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Set the default wallet id.
    #[must_use]
    pub fn with_wallet_id(mut self, wallet_id: impl Into<String>) -> Self {
        self.defaults.wallet_id = Some(wallet_id.into());
        self
    }

    /// Set the default wallet passphrase.
    #[must_use]
    pub fn with_wallet_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.defaults.wallet_passphrase = Some(passphrase.into());
        self
    }
}

/// One REST call: verb, path, body and response handling flags.
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// HTTP verb.
    pub method: Method,
    /// Path appended to the base URL; begins with `/`.
    pub path: String,
    /// JSON body, sent for every verb.
    pub params: Params,
    /// Decode the response body as JSON.
    pub parse_json: bool,
    /// Attach the session token, if one is set.
    pub with_auth: bool,
}

impl Endpoint {
    /// Endpoint with an empty body, JSON parsing and authentication.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Params::new(),
            parse_json: true,
            with_auth: true,
        }
    }

    /// `GET` endpoint.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST` endpoint.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PUT` endpoint.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// `DELETE` endpoint.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add a body field.
    #[must_use]
    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Add a body field only when `value` is present.
    #[must_use]
    pub fn param_opt<V: Into<Value>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Merge a whole parameter map into the body.
    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.params.extend(params);
        self
    }

    /// Merge a serializable options struct into the body.
    pub fn body<T: Serialize>(self, value: &T) -> Result<Self, BitGoError> {
        Ok(self.params(to_params(value)?))
    }

    /// Return the raw response body instead of parsing it.
    #[must_use]
    pub fn raw(mut self) -> Self {
        self.parse_json = false;
        self
    }

    /// Never send the `Authorization` header.
    #[must_use]
    pub fn without_auth(mut self) -> Self {
        self.with_auth = false;
        self
    }
}

/// Result of a successful call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// Decoded JSON body.
    Json(Value),
    /// Raw body text, when JSON parsing was not requested.
    Raw(String),
}

impl ApiResponse {
    /// The decoded JSON, or the raw body as a JSON string.
    pub fn into_value(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Raw(text) => Value::String(text),
        }
    }

    /// The raw body, or the JSON re-encoded as text.
    pub fn into_text(self) -> String {
        match self {
            Self::Json(value) => value.to_string(),
            Self::Raw(text) => text,
        }
    }
}

/// Value of an environment variable; `None` only when it is not set.
pub(crate) fn read_env(name: &'static str) -> Result<Option<String>, BitGoError> {
    match std::env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(BitGoError::InvalidArgument {
            name,
            reason: "environment variable is not valid unicode".to_string(),
        }),
    }
}

/// Serialize an options struct into a parameter map.
///
/// Unset optional fields must be marked `skip_serializing_if` on the struct;
/// they are then absent from the map rather than `null`.
pub fn to_params<T: Serialize>(value: &T) -> Result<Params, BitGoError> {
    match serde_json::to_value(value).map_err(BitGoError::Serialization)? {
        Value::Object(map) => Ok(map),
        other => Err(BitGoError::Serialization(serde::ser::Error::custom(
            format!("expected a JSON object, got {other}"),
        ))),
    }
}

/// Decode a hex keychain seed into the byte array BitGo expects.
pub fn seed_bytes(seed: &str) -> Result<Vec<u8>, BitGoError> {
    hex::decode(seed).map_err(|e| BitGoError::InvalidArgument {
        name: "seed",
        reason: e.to_string(),
    })
}
