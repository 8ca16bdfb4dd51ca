//! Tests for the BitGo transport.

use reqwest::Method;
use serde::Serialize;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::client::Transport;
use crate::error::BitGoError;
use crate::types::{
    read_env, seed_bytes, to_params, ApiResponse, ApiVersion, BitGoConfig, Endpoint,
    Environment, WalletDefaults,
};
use crate::user::UserApi;

fn authed_transport(base_url: &str) -> Transport {
    let mut transport = Transport::new(base_url);
    transport.set_session_token("test-token");
    transport
}

#[tokio::test]
async fn test_every_supported_verb_sends_json_body() {
    let server = MockServer::start().await;

    for verb in ["GET", "POST", "PUT", "DELETE"] {
        Mock::given(method(verb))
            .and(path("/wallet/w1/webhooks"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({ "type": "transaction" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "verb": verb
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let transport = authed_transport(&server.uri());
    for verb in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
        let endpoint =
            Endpoint::new(verb.clone(), "/wallet/w1/webhooks").param("type", "transaction");
        let value = transport.call_json(endpoint).await.unwrap();
        assert_eq!(value["verb"], verb.as_str());
    }
}

#[tokio::test]
async fn test_empty_params_send_empty_object() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/keychain"))
        .and(body_json(serde_json::json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "keychains": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = authed_transport(&server.uri());
    let value = transport.call_json(Endpoint::get("/keychain")).await.unwrap();
    assert!(value["keychains"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unsupported_verb_never_reaches_network() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let transport = authed_transport(&server.uri());
    for verb in [Method::PATCH, Method::HEAD, Method::OPTIONS] {
        let err = transport
            .call(Endpoint::new(verb.clone(), "/wallet"))
            .await
            .unwrap_err();
        assert!(err.is_config());
        assert!(matches!(err, BitGoError::UnsupportedMethod(ref m) if m == verb.as_str()));
    }

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_bearer_header_sent_when_token_set() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/session"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "session": { "client": "bitgo" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = authed_transport(&server.uri());
    let value = transport.call_json(Endpoint::get("/user/session")).await.unwrap();
    assert_eq!(value["session"]["client"], "bitgo");
}

#[tokio::test]
async fn test_no_auth_header_when_auth_disabled() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "fresh"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = authed_transport(&server.uri());
    let endpoint = Endpoint::post("/user/login").without_auth();
    transport.call_json(endpoint).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_no_auth_header_without_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wallet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "wallets": []
        })))
        .mount(&server)
        .await;

    let transport = Transport::new(server.uri());
    transport.call_json(Endpoint::get("/wallet")).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_vendor_error_on_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/unlock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": "bad otp"
        })))
        .mount(&server)
        .await;

    let transport = authed_transport(&server.uri());
    let err = transport
        .call_json(Endpoint::post("/user/unlock"))
        .await
        .unwrap_err();

    assert!(err.is_vendor());
    assert_eq!(err.vendor_message().as_deref(), Some("bad otp"));
    assert!(err.to_string().contains("bad otp"));
}

#[tokio::test]
async fn test_vendor_error_on_failure_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wallet/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": "wallet not found",
            "name": "WalletNotFound"
        })))
        .mount(&server)
        .await;

    let transport = authed_transport(&server.uri());
    let err = transport
        .call_json(Endpoint::get("/wallet/missing"))
        .await
        .unwrap_err();
    assert_eq!(err.vendor_message().as_deref(), Some("wallet not found"));
}

#[tokio::test]
async fn test_failure_status_without_error_field_is_returned() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wallet/w1"))
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "status": "maintenance"
        })))
        .mount(&server)
        .await;

    let transport = authed_transport(&server.uri());
    let value = transport.call_json(Endpoint::get("/wallet/w1")).await.unwrap();
    assert_eq!(value["status"], "maintenance");
}

#[tokio::test]
async fn test_html_body_is_decode_error_with_raw_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wallet"))
        .respond_with(
            ResponseTemplate::new(502).set_body_string("<html><body>Bad Gateway</body></html>"),
        )
        .mount(&server)
        .await;

    let transport = authed_transport(&server.uri());
    let err = transport.call(Endpoint::get("/wallet")).await.unwrap_err();

    match &err {
        BitGoError::Decode { body, .. } => {
            assert_eq!(body, "<html><body>Bad Gateway</body></html>");
        }
        other => panic!("expected decode error, got {other:?}"),
    }
    assert!(err.to_string().contains("Bad Gateway"));
    assert!(!err.is_config());
}

#[tokio::test]
async fn test_empty_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/lock"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let transport = authed_transport(&server.uri());
    let err = transport.call(Endpoint::post("/user/lock")).await.unwrap_err();
    assert!(matches!(err, BitGoError::Decode { ref body, .. } if body.is_empty()));
}

#[tokio::test]
async fn test_raw_mode_returns_body_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"error\": not json"))
        .mount(&server)
        .await;

    let transport = authed_transport(&server.uri());
    let resp = transport.call(Endpoint::get("/raw").raw()).await.unwrap();
    assert_eq!(resp, ApiResponse::Raw("{\"error\": not json".to_string()));
}

#[tokio::test]
async fn test_raw_mode_skips_vendor_error_detection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"error":"bad otp"}"#))
        .mount(&server)
        .await;

    let transport = authed_transport(&server.uri());
    let resp = transport.call(Endpoint::get("/raw").raw()).await.unwrap();
    assert_eq!(resp.into_text(), r#"{"error":"bad otp"}"#);
}

#[tokio::test]
async fn test_connection_refused() {
    let transport = Transport::new("http://127.0.0.1:1");
    let err = transport.call(Endpoint::get("/wallet")).await.unwrap_err();
    assert!(matches!(err, BitGoError::HttpError(_)));
    assert!(!err.is_config());
}

#[tokio::test]
async fn test_invalid_session_token_fails_before_request() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let mut transport = Transport::new(server.uri());
    transport.set_session_token("tok\nen");

    let err = transport
        .call_json(Endpoint::get("/user/session"))
        .await
        .unwrap_err();
    assert!(err.is_config());
    assert!(matches!(
        err,
        BitGoError::InvalidArgument {
            name: "session_token",
            ..
        }
    ));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_invalid_session_token_ignored_without_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "fresh"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut transport = Transport::new(server.uri());
    transport.set_session_token("caf\u{e9}\r\n");

    let login = UserApi::new(&transport)
        .login("me@example.com", "pw", "0000000")
        .await
        .unwrap();
    assert_eq!(login["access_token"], "fresh");
}

#[tokio::test]
async fn test_login_sends_credentials_without_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/login"))
        .and(body_json(serde_json::json!({
            "email": "a@b.c",
            "password": "pw",
            "otp": "0000000"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "new-token",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = authed_transport(&server.uri());
    let value = UserApi::new(&transport)
        .login("a@b.c", "pw", "0000000")
        .await
        .unwrap();
    assert_eq!(value["access_token"], "new-token");

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_user_endpoints_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/sendotp"))
        .and(body_json(serde_json::json!({ "forceSMS": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/user/unlock"))
        .and(body_json(serde_json::json!({ "otp": "0000000", "duration": 600 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "session": { "unlock": { "time": "now" } }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/logout"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = authed_transport(&server.uri());
    let user = UserApi::new(&transport);
    user.send_otp(true).await.unwrap();
    let unlocked = user.unlock("0000000", 600).await.unwrap();
    assert_eq!(unlocked["session"]["unlock"]["time"], "now");
    user.logout().await.unwrap();
}

#[test]
fn test_session_token_lifecycle() {
    let config = BitGoConfig::new("http://localhost").with_session_token("abc");
    let mut transport = Transport::from_config(&config);
    assert_eq!(transport.session_token(), Some("abc"));
    assert_eq!(transport.base_url(), "http://localhost");

    transport.set_session_token("def");
    assert_eq!(transport.session_token(), Some("def"));

    transport.clear_session_token();
    assert!(transport.session_token().is_none());
}

#[test]
fn test_read_env_unset_and_set() {
    assert_eq!(read_env("BITGO_TEST_READ_ENV_UNSET").unwrap(), None);

    std::env::set_var("BITGO_TEST_READ_ENV_SET", "w-from-env");
    assert_eq!(
        read_env("BITGO_TEST_READ_ENV_SET").unwrap().as_deref(),
        Some("w-from-env")
    );
}

#[cfg(unix)]
#[test]
fn test_read_env_rejects_non_unicode() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    std::env::set_var(
        "BITGO_TEST_READ_ENV_NOT_UNICODE",
        OsStr::from_bytes(&[0x66, 0x6f, 0x80]),
    );
    let err = read_env("BITGO_TEST_READ_ENV_NOT_UNICODE").unwrap_err();
    assert!(err.is_config());
    assert!(matches!(
        err,
        BitGoError::InvalidArgument {
            name: "BITGO_TEST_READ_ENV_NOT_UNICODE",
            ..
        }
    ));
}

#[test]
fn test_environment_base_urls() {
    assert_eq!(
        Environment::Production.base_url(ApiVersion::V1),
        "https://www.bitgo.com/api/v1"
    );
    assert_eq!(
        Environment::Test.base_url(ApiVersion::V2),
        "https://test.bitgo.com/api/v2"
    );
    assert_eq!(
        Environment::Express.base_url(ApiVersion::V1),
        "http://127.0.0.1:3080/api/v1"
    );
    assert_eq!(Environment::default(), Environment::Production);

    let config = BitGoConfig::for_env(ApiVersion::V2, Environment::Express);
    assert_eq!(config.base_url, "http://127.0.0.1:3080/api/v2");
    assert!(config.session_token.is_none());
}

#[test]
fn test_environment_parse() {
    assert_eq!("LIVE".parse::<Environment>().unwrap(), Environment::Production);
    assert_eq!("test".parse::<Environment>().unwrap(), Environment::Test);
    assert_eq!("express".parse::<Environment>().unwrap(), Environment::Express);

    let err = "staging".parse::<Environment>().unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("staging"));
}

#[test]
fn test_wallet_defaults_fallback() {
    let defaults = WalletDefaults {
        wallet_id: Some("default-wallet".to_string()),
        wallet_passphrase: None,
    };

    assert_eq!(defaults.wallet_id(None).unwrap(), "default-wallet");
    assert_eq!(defaults.wallet_id(Some("explicit")).unwrap(), "explicit");
    assert_eq!(defaults.wallet_passphrase(Some("pw")).unwrap(), "pw");

    let err = defaults.wallet_passphrase(None).unwrap_err();
    assert!(matches!(err, BitGoError::MissingArgument("wallet_passphrase")));
}

#[test]
fn test_config_builders() {
    let config = BitGoConfig::new("http://localhost:3080/api/v1")
        .with_wallet_id("w1")
        .with_wallet_passphrase("secret");
    assert_eq!(config.defaults.wallet_id.as_deref(), Some("w1"));
    assert_eq!(config.defaults.wallet_passphrase.as_deref(), Some("secret"));
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WebhookOptions {
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_confirmations: Option<u32>,
}

#[test]
fn test_to_params_omits_unset_fields() {
    let params = to_params(&WebhookOptions {
        url: "https://example.com/hook".to_string(),
        num_confirmations: None,
    })
    .unwrap();

    assert_eq!(params.len(), 1);
    assert!(!params.contains_key("numConfirmations"));

    let endpoint = Endpoint::post("/x")
        .param_opt("fee", None::<u64>)
        .param_opt("otp", Some("123"));
    assert!(!endpoint.params.contains_key("fee"));
    assert_eq!(endpoint.params["otp"], "123");
}

#[test]
fn test_to_params_rejects_non_objects() {
    let err = to_params(&vec![1, 2, 3]).unwrap_err();
    assert!(matches!(err, BitGoError::Serialization(_)));
    assert!(err.is_config());
}

#[test]
fn test_seed_bytes() {
    assert_eq!(seed_bytes("00ff10").unwrap(), vec![0x00, 0xff, 0x10]);

    let err = seed_bytes("not-hex").unwrap_err();
    assert!(matches!(err, BitGoError::InvalidArgument { name: "seed", .. }));
}
