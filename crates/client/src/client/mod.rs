//! The ArcSight Logger client.
//!
//! This module provides [`LoggerClient`], which owns the HTTP client, the
//! session token and the per-client search bookkeeping.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `session`: Login and logout
//! - `search`: Starting, inspecting, stopping and closing searches
//! - `results`: Events, raw events, histogram, drilldown and chart data
//! - `wait`: Polling a search until it reaches a terminal status
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Token storage details (delegated to [`crate::auth::SessionManager`])
//!
//! # Invariants
//! - Only `login` and `logout` take `&mut self`; every search operation takes
//!   `&self`, so one token can drive several searches concurrently.
//! - A search id closed through this client is rejected locally with
//!   [`ClientError::SearchClosed`] and never reaches the server again.

pub mod builder;
mod results;
mod search;
mod session;
mod wait;

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use arcsight_config::{LoginDialect, PollConfig};

use crate::auth::{SessionManager, SessionToken};
use crate::error::{ClientError, Result};
use crate::ids::SearchIdGenerator;
use crate::metrics::MetricsCollector;
use crate::models::SearchId;

/// ArcSight Logger REST client.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use arcsight_client::{Credentials, LoggerClient};
/// use secrecy::SecretString;
///
/// let mut client = LoggerClient::builder()
///     .base_url("https://logger.example.com:9000".to_string())
///     .credentials(Credentials::new("admin", SecretString::from("secret")))
///     .build()?;
/// client.login().await?;
/// let started = client.search("name CONTAINS \"login\"").await?;
/// client.wait(started.search_id).await?;
/// ```
#[derive(Debug)]
pub struct LoggerClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) dialect: LoginDialect,
    pub(crate) session: SessionManager,
    pub(crate) poll: PollConfig,
    pub(crate) ids: SearchIdGenerator,
    /// Ids closed through this client. Grows by one entry per `close`;
    /// long-lived clients release entries with [`LoggerClient::forget_closed`].
    pub(crate) closed: Mutex<HashSet<SearchId>>,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl LoggerClient {
    /// Create a new client builder.
    pub fn builder() -> builder::LoggerClientBuilder {
        builder::LoggerClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn login_dialect(&self) -> LoginDialect {
        self.dialect
    }

    /// Polling policy used by [`LoggerClient::wait`].
    pub fn poll_config(&self) -> &PollConfig {
        &self.poll
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.token().is_some()
    }

    /// The current session token, if logged in.
    pub fn session_token(&self) -> Option<&SessionToken> {
        self.session.token()
    }

    /// Adopt a token obtained elsewhere, e.g. by an earlier process.
    pub fn set_session_token(&mut self, token: SessionToken) {
        self.session.set_token(token);
    }

    /// True if `search_id` was closed through this client.
    pub fn is_closed(&self, search_id: SearchId) -> bool {
        self.closed_set().contains(&search_id)
    }

    /// Stop tracking a closed search, returning whether it was tracked.
    ///
    /// Calls with a forgotten id reach the Logger again instead of failing locally.
    pub fn forget_closed(&self, search_id: SearchId) -> bool {
        self.closed_set().remove(&search_id)
    }

    fn closed_set(&self) -> MutexGuard<'_, HashSet<SearchId>> {
        self.closed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn ensure_open(&self, search_id: SearchId) -> Result<()> {
        if self.is_closed(search_id) {
            Err(ClientError::SearchClosed(search_id))
        } else {
            Ok(())
        }
    }

    pub(crate) fn mark_closed(&self, search_id: SearchId) {
        self.closed_set().insert(search_id);
    }

    /// Token for a request against an open search.
    pub(crate) fn open_search_token(&self, search_id: SearchId) -> Result<&str> {
        self.ensure_open(search_id)?;
        self.session.bearer()
    }
}
