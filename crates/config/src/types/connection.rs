//! Connection configuration types.
//!
//! Responsibilities:
//! - Define connection settings (URL, TLS verification, timeout, login dialect).
//! - Define the main `Config` structure combining connection, auth and polling.
//!
//! Does NOT handle:
//! - Configuration loading from files/env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - TLS verification is on unless `skip_verify` is explicitly set.
//! - All duration fields are serialized as seconds (integers).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::auth::AuthConfig;
use super::poll::PollConfig;
use super::serde_helpers::duration_seconds;
use crate::constants::DEFAULT_TIMEOUT_SECS;

/// Payload shape used by the Logger login and logout services.
///
/// Older Logger releases accept a flat form-encoded body and answer with an
/// XML document; newer ones take a nested `log.login` JSON object and answer
/// with JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginDialect {
    /// `login=...&password=...`, token returned in `<ns3:return>`.
    Form,
    /// `{"log.login": {"log.login": ..., "log.password": ...}}`.
    #[default]
    Json,
}

impl LoginDialect {
    /// Stable lowercase name used in config files and environment variables.
    pub const fn as_str(self) -> &'static str {
        match self {
            LoginDialect::Form => "form",
            LoginDialect::Json => "json",
        }
    }
}

impl fmt::Display for LoginDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoginDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "form" | "xml" => Ok(LoginDialect::Form),
            "json" => Ok(LoginDialect::Json),
            other => Err(format!("unknown login dialect '{other}' (expected form or json)")),
        }
    }
}

/// Connection configuration for the Logger server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the Logger server (e.g., https://logger.example.com:9000)
    pub base_url: String,
    /// Whether to skip TLS verification (for self-signed certificates)
    #[serde(default)]
    pub skip_verify: bool,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds", default = "default_timeout")]
    pub timeout: Duration,
    /// Login/logout payload dialect
    #[serde(default)]
    pub login_dialect: LoginDialect,
}

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

impl ConnectionConfig {
    /// Connection settings for `base_url` with verification on and default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            skip_verify: false,
            timeout: default_timeout(),
            login_dialect: LoginDialect::default(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Authentication settings
    pub auth: AuthConfig,
    /// Search polling settings
    #[serde(default)]
    pub poll: PollConfig,
}

impl Config {
    /// Create a config for `base_url` using the given credentials and defaults elsewhere.
    pub fn new(base_url: impl Into<String>, auth: AuthConfig) -> Self {
        Self {
            connection: ConnectionConfig::new(base_url),
            auth,
            poll: PollConfig::default(),
        }
    }
}
