//! Secret protection tests for credentials, session tokens and clients.
//!
//! Passwords and tokens must never show up in Debug output, error messages or logs.

use arcsight_client::{ClientError, Credentials, LoggerClient, SessionManager, SessionToken};
mod common;

use common::CapturedLogs;
use secrecy::SecretString;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PASSWORD: &str = "s3cr3t-p4ssw0rd";
const TOKEN: &str = "tok-5f2a9c1e";

#[test]
fn test_credentials_debug_hides_password() {
    let credentials = Credentials::new("admin", SecretString::from(PASSWORD));
    let debug = format!("{:?}", credentials);

    assert!(!debug.contains(PASSWORD), "password leaked: {}", debug);
    assert!(debug.contains("admin"));
}

#[test]
fn test_session_manager_debug_hides_everything_secret() {
    let manager = SessionManager::new(
        Some(Credentials::new("admin", SecretString::from(PASSWORD))),
        SessionToken::new(TOKEN),
    );
    let debug = format!("{:?}", manager);

    assert!(!debug.contains(PASSWORD), "password leaked: {}", debug);
    assert!(!debug.contains(TOKEN), "token leaked: {}", debug);
}

#[test]
fn test_client_debug_hides_token_and_password() {
    let client = LoggerClient::builder()
        .base_url("https://logger:9000".to_string())
        .credentials(Credentials::new("admin", SecretString::from(PASSWORD)))
        .session_token(SessionToken::new(TOKEN).unwrap())
        .build()
        .unwrap();
    let debug = format!("{:?}", client);

    assert!(!debug.contains(PASSWORD), "password leaked: {}", debug);
    assert!(!debug.contains(TOKEN), "token leaked: {}", debug);
}

#[test]
fn test_empty_token_is_rejected() {
    assert!(SessionToken::new("").is_none());
    assert!(SessionToken::new("   ").is_none());
}

#[test]
fn test_not_authenticated_message_has_no_secret() {
    let message = ClientError::NotAuthenticated.to_string();
    assert!(!message.contains(TOKEN));
    assert!(message.contains("Not authenticated"));
}

#[tokio::test]
async fn test_logs_never_contain_password_or_token() {
    let logs = CapturedLogs::default();
    let _guard = logs.install();

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/core-service/rest/LoginService/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "log.loginResponse": {"log.return": TOKEN}
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/server/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"sessionId": 1})))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/core-service/rest/LoginService/logout"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let mut client = LoggerClient::builder()
        .base_url(mock_server.uri())
        .credentials(Credentials::new("admin", SecretString::from(PASSWORD)))
        .build()
        .unwrap();
    client.login().await.unwrap();
    client.search("name CONTAINS \"login\"").await.unwrap();
    client.logout().await.unwrap();

    let text = logs.text();
    assert!(text.contains("Logged in"), "expected login log, got: {text}");
    assert!(!text.contains(PASSWORD));
    assert!(!text.contains(TOKEN));
}
