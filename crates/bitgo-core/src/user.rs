//! User session endpoints, identical in both API versions.

use serde_json::Value;

use crate::client::Transport;
use crate::error::BitGoError;
use crate::types::Endpoint;

/// User and session calls, borrowed from a client's transport.
#[derive(Debug, Clone, Copy)]
pub struct UserApi<'a> {
    transport: &'a Transport,
}

impl<'a> UserApi<'a> {
    /// Wrap a transport.
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Information about the current session.
    pub async fn session_info(&self) -> Result<Value, BitGoError> {
        self.transport.call_json(Endpoint::get("/user/session")).await
    }

    /// Exchange credentials for a first-party access token.
    ///
    /// Sent without the `Authorization` header. The token in the response
    /// (`access_token`) is not stored; pass it to `set_session_token` on the
    /// client.
    pub async fn login(&self, email: &str, password: &str, otp: &str) -> Result<Value, BitGoError> {
        let endpoint = Endpoint::post("/user/login")
            .param("email", email)
            .param("password", password)
            .param("otp", otp)
            .without_auth();
        self.transport.call_json(endpoint).await
    }

    /// End the current session.
    pub async fn logout(&self) -> Result<Value, BitGoError> {
        self.transport.call_json(Endpoint::get("/user/logout")).await
    }

    /// Ask BitGo to send a one-time password to the user's device.
    pub async fn send_otp(&self, force_sms: bool) -> Result<Value, BitGoError> {
        let endpoint = Endpoint::post("/user/sendotp").param("forceSMS", force_sms);
        self.transport.call_json(endpoint).await
    }

    /// Unlock the session for spending for `duration_seconds`.
    pub async fn unlock(&self, otp: &str, duration_seconds: u64) -> Result<Value, BitGoError> {
        let endpoint = Endpoint::post("/user/unlock")
            .param("otp", otp)
            .param("duration", duration_seconds);
        self.transport.call_json(endpoint).await
    }

    /// Re-lock an unlocked session.
    pub async fn lock(&self) -> Result<Value, BitGoError> {
        self.transport.call_json(Endpoint::post("/user/lock")).await
    }
}
