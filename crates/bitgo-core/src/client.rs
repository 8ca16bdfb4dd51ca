//! HTTP transport shared by the versioned BitGo clients.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

use crate::error::BitGoError;
use crate::types::{ApiResponse, BitGoConfig, Endpoint};

/// Performs single BitGo API calls against a base URL.
///
/// Holds the base URL and the session token; every endpoint method of the
/// versioned clients ends up in [`Transport::call`].
#[derive(Debug, Clone)]
pub struct Transport {
    /// Base URL, e.g. `https://www.bitgo.com/api/v1`.
    base_url: String,
    /// Bearer token obtained from a login or an access token.
    session_token: Option<String>,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl Transport {
    /// Create a transport for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            session_token: None,
            client: reqwest::Client::new(),
        }
    }

    /// Create a transport from a client configuration.
    pub fn from_config(config: &BitGoConfig) -> Self {
        Self {
            session_token: config.session_token.clone(),
            ..Self::new(config.base_url.clone())
        }
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The current session token.
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    /// Set the token sent with authenticated calls.
    pub fn set_session_token(&mut self, token: impl Into<String>) {
        self.session_token = Some(token.into());
    }

    /// Forget the session token.
    pub fn clear_session_token(&mut self) {
        self.session_token = None;
    }

    /// Execute one request and normalize its outcome.
    ///
    /// The params are sent as a JSON body for every verb. When
    /// `endpoint.parse_json` is set, a body that is not JSON yields
    /// [`BitGoError::Decode`] and an object with a non-null `error` field
    /// yields [`BitGoError::Vendor`], whatever the HTTP status.
    pub async fn call(&self, endpoint: Endpoint) -> Result<ApiResponse, BitGoError> {
        let url = format!("{}{}", self.base_url, endpoint.path);

        let request = match endpoint.method.as_str() {
            "GET" => self.client.get(&url),
            "POST" => self.client.post(&url),
            "PUT" => self.client.put(&url),
            "DELETE" => self.client.delete(&url),
            other => return Err(BitGoError::UnsupportedMethod(other.to_string())),
        };

        let headers = self.build_headers(endpoint.with_auth)?;
        debug!(method = %endpoint.method, %url, "sending BitGo request");

        let resp = request
            .headers(headers)
            .json(&endpoint.params)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        debug!(%status, %url, "received BitGo response");

        if !endpoint.parse_json {
            return Ok(ApiResponse::Raw(body));
        }

        parse_body(body).map(ApiResponse::Json)
    }

    /// Execute one request and return the body as a JSON value.
    pub async fn call_json(&self, endpoint: Endpoint) -> Result<Value, BitGoError> {
        self.call(endpoint).await.map(ApiResponse::into_value)
    }

    /// Build the headers for one request.
    ///
    /// A token that is not a valid header value is an error, never a
    /// silently unauthenticated request.
    fn build_headers(&self, with_auth: bool) -> Result<HeaderMap, BitGoError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if with_auth {
            if let Some(ref token) = self.session_token {
                let val = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                    BitGoError::InvalidArgument {
                        name: "session_token",
                        reason: e.to_string(),
                    }
                })?;
                headers.insert(AUTHORIZATION, val);
            }
        }

        Ok(headers)
    }
}

/// Decode a response body, turning an `error` field into a failure.
fn parse_body(body: String) -> Result<Value, BitGoError> {
    let value: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(source) => return Err(BitGoError::Decode { source, body }),
    };

    if let Some(error) = value.get("error").filter(|e| !e.is_null()) {
        return Err(BitGoError::Vendor(error.clone()));
    }

    Ok(value)
}
