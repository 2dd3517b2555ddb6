//! Connection context for command execution.
//!
//! Responsibilities:
//! - Turn the merged configuration (flags, environment, config file) into a
//!   ready-to-use `LoggerClient`.
//! - Distinguish commands that log in with credentials from commands that
//!   reuse a session token.
//!
//! Does NOT handle:
//! - Configuration loading and precedence (see `arcsight_config::ConfigLoader`).
//! - CLI argument definitions (see `args` module).
//!
//! Invariants:
//! - Token commands never require credentials.
//! - A token client is never built without a non-empty token.

use anyhow::{Context, Result};
use arcsight_client::{
    CancellationToken, ClientError, LoggerClient, MetricsCollector, SessionToken,
};
use arcsight_config::ConfigLoader;
use secrecy::{ExposeSecret, SecretString};
use std::path::PathBuf;

use crate::formatters::OutputFormat;

/// Everything a command needs besides its own arguments.
pub(crate) struct CommandContext {
    pub(crate) loader: ConfigLoader,
    pub(crate) auth_token: Option<SecretString>,
    pub(crate) metrics: Option<MetricsCollector>,
    pub(crate) cancel: CancellationToken,
    pub(crate) format: OutputFormat,
    pub(crate) output_file: Option<PathBuf>,
    pub(crate) quiet: bool,
}

impl CommandContext {
    fn session_token(&self) -> Option<SessionToken> {
        self.auth_token
            .as_ref()
            .and_then(|token| SessionToken::new(token.expose_secret()))
    }

    pub(crate) fn has_token(&self) -> bool {
        self.session_token().is_some()
    }

    /// Client that logs in with username and password.
    pub(crate) fn credentialed_client(&self) -> Result<LoggerClient> {
        let config = self
            .loader
            .clone()
            .build()
            .context("Failed to load configuration")?;

        let mut builder = LoggerClient::builder().from_config(&config);
        if let Some(metrics) = &self.metrics {
            builder = builder.metrics(metrics.clone());
        }
        Ok(builder.build()?)
    }

    /// Client bound to the `--auth-token` session.
    pub(crate) fn token_client(&self) -> Result<LoggerClient> {
        let token = self.session_token().ok_or(ClientError::NotAuthenticated)?;
        let (connection, poll) = self
            .loader
            .build_connection()
            .context("Failed to load configuration")?;

        let mut builder = LoggerClient::builder()
            .from_connection(&connection, &poll)
            .session_token(token);
        if let Some(metrics) = &self.metrics {
            builder = builder.metrics(metrics.clone());
        }
        Ok(builder.build()?)
    }
}
