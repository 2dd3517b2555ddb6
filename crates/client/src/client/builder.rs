//! Client builder for constructing [`LoggerClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating and normalizing the base URL (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeout, redirects, TLS verification)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`LoggerClient`] methods)
//! - Logging in (credentials are only stored here)
//!
//! # Invariants
//! - `base_url` is required and must be an absolute http(s) URL
//! - The base URL is always normalized to have no trailing slashes
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use arcsight_config::{
    Config, ConnectionConfig, LoginDialect, PollConfig,
    constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS},
};

use crate::auth::{Credentials, SessionManager, SessionToken};
use crate::client::LoggerClient;
use crate::error::{ClientError, Result};
use crate::ids::SearchIdGenerator;
use crate::metrics::MetricsCollector;

/// Builder for creating a new [`LoggerClient`].
///
/// Everything except `base_url` has a default. Credentials are only needed
/// for [`LoggerClient::login`]; a client built with just a session token can
/// run searches straight away.
///
/// # Example
///
/// ```rust,ignore
/// use arcsight_client::LoggerClient;
/// use arcsight_config::LoginDialect;
///
/// let client = LoggerClient::builder()
///     .base_url("https://logger.example.com:9000".to_string())
///     .login_dialect(LoginDialect::Form)
///     .timeout(Duration::from_secs(60))
///     .build()?;
/// ```
#[derive(Debug)]
pub struct LoggerClientBuilder {
    base_url: Option<String>,
    credentials: Option<Credentials>,
    session_token: Option<SessionToken>,
    login_dialect: LoginDialect,
    skip_verify: bool,
    timeout: Duration,
    poll: PollConfig,
    metrics: Option<MetricsCollector>,
}

impl Default for LoggerClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            credentials: None,
            session_token: None,
            login_dialect: LoginDialect::default(),
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            poll: PollConfig::default(),
            metrics: None,
        }
    }
}

impl LoggerClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the Logger, e.g. `https://logger.example.com:9000`.
    ///
    /// Trailing slashes will be automatically removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Username and password used by [`LoggerClient::login`].
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Start with an existing session token instead of logging in.
    pub fn session_token(mut self, token: SessionToken) -> Self {
        self.session_token = Some(token);
        self
    }

    /// Wire format of the login and logout calls. Default is [`LoginDialect::Json`].
    pub fn login_dialect(mut self, dialect: LoginDialect) -> Self {
        self.login_dialect = dialect;
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this in development or testing environments. Disabling TLS
    /// verification makes the connection vulnerable to man-in-the-middle attacks.
    ///
    /// # Note
    /// This only affects HTTPS connections. For HTTP URLs, a warning is logged
    /// but no error occurs.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the per-request timeout.
    ///
    /// Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Polling policy for [`LoggerClient::wait`].
    pub fn poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Set the metrics collector for API call performance tracking.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Create a client builder from loaded configuration.
    pub fn from_config(self, config: &Config) -> Self {
        let mut builder = self.from_connection(&config.connection, &config.poll);
        builder.credentials = Some(Credentials::new(
            config.auth.username.clone(),
            config.auth.password.clone(),
        ));
        builder
    }

    /// Apply connection and polling settings without touching credentials.
    pub fn from_connection(mut self, connection: &ConnectionConfig, poll: &PollConfig) -> Self {
        self.base_url = Some(connection.base_url.clone());
        self.login_dialect = connection.login_dialect;
        self.skip_verify = connection.skip_verify;
        self.timeout = connection.timeout;
        self.poll = poll.clone();
        self
    }

    /// Normalize a base URL by removing trailing slashes.
    ///
    /// - `"https://logger:9000/"` -> `"https://logger:9000"`
    /// - `"https://logger:9000//"` -> `"https://logger:9000"`
    fn normalize_base_url(url: &str) -> String {
        url.trim().trim_end_matches('/').to_string()
    }

    /// Build the [`LoggerClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is missing or is not an
    /// absolute http(s) URL.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<LoggerClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(&base_url);

        let parsed = reqwest::Url::parse(&base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "unsupported scheme '{}' in {}",
                parsed.scheme(),
                base_url
            )));
        }

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if parsed.scheme() == "https" {
                tracing::warn!(
                    base_url = %base_url,
                    "TLS certificate verification is disabled for this Logger"
                );
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;

        Ok(LoggerClient {
            http,
            base_url,
            dialect: self.login_dialect,
            session: SessionManager::new(self.credentials, self.session_token),
            poll: self.poll,
            ids: SearchIdGenerator::new(),
            closed: Mutex::new(HashSet::new()),
            metrics: self.metrics,
        })
    }
}
