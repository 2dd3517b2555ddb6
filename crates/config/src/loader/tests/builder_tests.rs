//! Builder and validation tests for the configuration loader.

use crate::constants::{DEFAULT_POLL_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS};
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use crate::types::LoginDialect;
use secrecy::ExposeSecret;
use std::time::Duration;

fn base_loader() -> ConfigLoader {
    ConfigLoader::new()
        .with_base_url("https://logger.example.com:9000".to_string())
        .with_username("admin".to_string())
        .with_password("password".to_string())
}

#[test]
fn test_build_applies_defaults() {
    let config = base_loader().build().unwrap();

    assert_eq!(config.connection.base_url, "https://logger.example.com:9000");
    assert!(!config.connection.skip_verify);
    assert_eq!(
        config.connection.timeout,
        Duration::from_secs(DEFAULT_TIMEOUT_SECS)
    );
    assert_eq!(config.connection.login_dialect, LoginDialect::Json);
    assert_eq!(
        config.poll.interval,
        Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS)
    );
    assert_eq!(config.poll.max_polls, None);
    assert_eq!(config.poll.max_wait, None);
    assert_eq!(config.auth.username, "admin");
    assert_eq!(config.auth.password.expose_secret(), "password");
}

#[test]
fn test_missing_base_url() {
    let result = ConfigLoader::new()
        .with_username("admin".to_string())
        .with_password("password".to_string())
        .build();
    assert!(matches!(result, Err(ConfigError::MissingBaseUrl)));
}

#[test]
fn test_blank_base_url_is_missing() {
    let result = base_loader().with_base_url("   ".to_string()).build();
    assert!(matches!(result, Err(ConfigError::MissingBaseUrl)));
}

#[test]
fn test_missing_password_is_missing_auth() {
    let result = ConfigLoader::new()
        .with_base_url("https://logger:9000".to_string())
        .with_username("admin".to_string())
        .build();
    assert!(matches!(result, Err(ConfigError::MissingAuth)));
}

#[test]
fn test_build_connection_needs_no_credentials() {
    let (connection, poll) = ConfigLoader::new()
        .with_base_url("logger.example.com:9000/".to_string())
        .with_max_polls(4)
        .build_connection()
        .unwrap();
    assert_eq!(connection.base_url, "https://logger.example.com:9000");
    assert_eq!(poll.max_polls, Some(4));
}

#[test]
fn test_build_connection_still_validates() {
    let result = ConfigLoader::new()
        .with_base_url("https://logger:9000".to_string())
        .with_poll_interval(Duration::ZERO)
        .build_connection();
    assert!(matches!(result, Err(ConfigError::InvalidPoll { .. })));
}

#[test]
fn test_bare_host_gets_https_scheme() {
    let config = base_loader()
        .with_base_url("logger.example.com:9000".to_string())
        .build()
        .unwrap();
    assert_eq!(config.connection.base_url, "https://logger.example.com:9000");
}

#[test]
fn test_trailing_slash_is_stripped() {
    let config = base_loader()
        .with_base_url("https://logger.example.com:9000/".to_string())
        .build()
        .unwrap();
    assert_eq!(config.connection.base_url, "https://logger.example.com:9000");
}

#[test]
fn test_non_http_scheme_rejected() {
    let result = base_loader()
        .with_base_url("ftp://logger.example.com".to_string())
        .build();
    match result {
        Err(ConfigError::InvalidValue { var, message }) => {
            assert_eq!(var, "base_url");
            assert!(message.contains("ftp"), "unexpected message: {message}");
        }
        other => panic!("Expected InvalidValue, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_timeout_zero_invalid() {
    let result = base_loader().with_timeout(Duration::from_secs(0)).build();
    match result {
        Err(ConfigError::InvalidTimeout { message }) => {
            assert!(message.contains("must be greater than 0"));
        }
        other => panic!("Expected InvalidTimeout, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_timeout_exceeds_max_invalid() {
    let result = base_loader()
        .with_timeout(Duration::from_secs(MAX_TIMEOUT_SECS + 1))
        .build();
    assert!(matches!(result, Err(ConfigError::InvalidTimeout { .. })));
}

#[test]
fn test_timeout_at_max_valid() {
    let config = base_loader()
        .with_timeout(Duration::from_secs(MAX_TIMEOUT_SECS))
        .build()
        .unwrap();
    assert_eq!(config.connection.timeout.as_secs(), MAX_TIMEOUT_SECS);
}

#[test]
fn test_zero_poll_interval_invalid() {
    let result = base_loader().with_poll_interval(Duration::ZERO).build();
    assert!(matches!(result, Err(ConfigError::InvalidPoll { .. })));
}

#[test]
fn test_zero_max_polls_invalid() {
    let result = base_loader().with_max_polls(0).build();
    match result {
        Err(ConfigError::InvalidPoll { message }) => assert!(message.contains("max_polls")),
        other => panic!("Expected InvalidPoll, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_poll_bounds_are_kept() {
    let config = base_loader()
        .with_poll_interval(Duration::from_secs(2))
        .with_max_polls(10)
        .with_max_wait(Duration::from_secs(60))
        .with_max_poll_errors(0)
        .build()
        .unwrap();
    assert_eq!(config.poll.interval, Duration::from_secs(2));
    assert_eq!(config.poll.max_polls, Some(10));
    assert_eq!(config.poll.max_wait, Some(Duration::from_secs(60)));
    assert_eq!(config.poll.max_poll_errors, 0);
}

#[test]
fn test_form_dialect_and_skip_verify() {
    let config = base_loader()
        .with_login_dialect(LoginDialect::Form)
        .with_skip_verify(true)
        .build()
        .unwrap();
    assert_eq!(config.connection.login_dialect, LoginDialect::Form);
    assert!(config.connection.skip_verify);
}
