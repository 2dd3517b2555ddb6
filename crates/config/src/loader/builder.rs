//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Support loading from environment variables, a config file, and direct builder methods.
//! - Validate and build the final `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Config file parsing (delegated to file.rs).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables.
//! - Environment variables take precedence over config file values.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use super::file::apply_file;
use crate::constants::{
    DEFAULT_MAX_POLL_ERRORS, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS,
    MAX_POLL_INTERVAL_SECS, MAX_TIMEOUT_SECS,
};
use crate::types::{AuthConfig, Config, ConnectionConfig, LoginDialect, PollConfig};

/// Configuration loader that builds config from environment variables and files.
#[derive(Default, Clone)]
pub struct ConfigLoader {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    login_dialect: Option<LoginDialect>,
    poll_interval: Option<Duration>,
    max_polls: Option<u32>,
    max_wait: Option<Duration>,
    max_poll_errors: Option<u32>,
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// Missing `.env` files are silently ignored.
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Read configuration from the config file, if a path has been set.
    ///
    /// File values only fill settings that are still unset, so this may be
    /// called before or after [`Self::from_env`].
    pub fn from_file(mut self) -> Result<Self, ConfigError> {
        apply_file(&mut self)?;
        Ok(self)
    }

    /// Override the config file path.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the username.
    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    /// Set the password.
    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(SecretString::new(password.into()));
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the login payload dialect.
    pub fn with_login_dialect(mut self, dialect: LoginDialect) -> Self {
        self.login_dialect = Some(dialect);
        self
    }

    /// Set the interval between status checks.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Bound the number of status checks performed while waiting.
    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = Some(max_polls);
        self
    }

    /// Bound the total time spent waiting for a search.
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    /// Set how many consecutive transient status-check failures a wait tolerates.
    pub fn with_max_poll_errors(mut self, max_poll_errors: u32) -> Self {
        self.max_poll_errors = Some(max_poll_errors);
        self
    }

    /// Build the final configuration.
    ///
    /// # Errors
    ///
    /// Everything [`ConfigLoader::build_connection`] reports, then
    /// [`ConfigError::MissingAuth`] if the username or password is unset.
    pub fn build(self) -> Result<Config, ConfigError> {
        let (connection, poll) = self.build_connection()?;

        let auth = match (self.username, self.password) {
            (Some(username), Some(password)) => AuthConfig { username, password },
            _ => return Err(ConfigError::MissingAuth),
        };

        Ok(Config {
            connection,
            auth,
            poll,
        })
    }

    /// Build only the connection and polling settings.
    ///
    /// For callers that already hold a session token and never log in.
    pub fn build_connection(&self) -> Result<(ConnectionConfig, PollConfig), ConfigError> {
        let base_url = self
            .base_url
            .as_deref()
            .map(validate_and_normalize_base_url)
            .transpose()?
            .ok_or(ConfigError::MissingBaseUrl)?;

        let connection = ConnectionConfig {
            base_url,
            skip_verify: self.skip_verify.unwrap_or(false),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            login_dialect: self.login_dialect.unwrap_or_default(),
        };

        let poll = PollConfig {
            interval: self
                .poll_interval
                .unwrap_or(Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS)),
            max_polls: self.max_polls,
            max_wait: self.max_wait,
            max_poll_errors: self.max_poll_errors.unwrap_or(DEFAULT_MAX_POLL_ERRORS),
        };

        Self::validate_timeout_config(&connection)?;
        Self::validate_poll_config(&poll)?;

        Ok((connection, poll))
    }

    /// Checks that the timeout is non-zero and not above `MAX_TIMEOUT_SECS`.
    fn validate_timeout_config(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }

        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        Ok(())
    }

    fn validate_poll_config(poll: &PollConfig) -> Result<(), ConfigError> {
        if poll.interval.is_zero() {
            return Err(ConfigError::InvalidPoll {
                message: "poll interval must be greater than 0".to_string(),
            });
        }

        if poll.interval > Duration::from_secs(MAX_POLL_INTERVAL_SECS) {
            return Err(ConfigError::InvalidPoll {
                message: format!(
                    "poll interval exceeds maximum allowed value of {} seconds",
                    MAX_POLL_INTERVAL_SECS
                ),
            });
        }

        if poll.max_polls == Some(0) {
            return Err(ConfigError::InvalidPoll {
                message: "max_polls must be at least 1".to_string(),
            });
        }

        if poll.max_wait.is_some_and(|d| d.is_zero()) {
            return Err(ConfigError::InvalidPoll {
                message: "max_wait must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    // Internal accessors for the env and file modules

    pub(crate) fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    pub(crate) fn set_config_path(&mut self, path: Option<PathBuf>) {
        self.config_path = path;
    }

    pub(crate) fn base_url_mut(&mut self) -> &mut Option<String> {
        &mut self.base_url
    }

    pub(crate) fn username_mut(&mut self) -> &mut Option<String> {
        &mut self.username
    }

    pub(crate) fn password_mut(&mut self) -> &mut Option<SecretString> {
        &mut self.password
    }

    pub(crate) fn skip_verify_mut(&mut self) -> &mut Option<bool> {
        &mut self.skip_verify
    }

    pub(crate) fn timeout_mut(&mut self) -> &mut Option<Duration> {
        &mut self.timeout
    }

    pub(crate) fn login_dialect_mut(&mut self) -> &mut Option<LoginDialect> {
        &mut self.login_dialect
    }

    pub(crate) fn poll_interval_mut(&mut self) -> &mut Option<Duration> {
        &mut self.poll_interval
    }

    pub(crate) fn max_polls_mut(&mut self) -> &mut Option<u32> {
        &mut self.max_polls
    }

    pub(crate) fn max_wait_mut(&mut self) -> &mut Option<Duration> {
        &mut self.max_wait
    }
}

/// Validates and normalizes a base URL string.
///
/// Validation rules:
/// - Trim surrounding whitespace
/// - Treat blank/whitespace-only as missing (returns Err(ConfigError::MissingBaseUrl))
/// - A value without a scheme is treated as an HTTPS host
/// - Require scheme is http or https and a host is present
/// - Normalize by stripping trailing slash
pub(crate) fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = url::Url::parse(&candidate).map_err(|e| ConfigError::InvalidValue {
        var: "base_url".into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. https://logger:9000): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: format!("scheme must be http or https, got: {scheme}"),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: "host is required (e.g. https://logger:9000)".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
