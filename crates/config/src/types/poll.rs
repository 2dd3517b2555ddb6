//! Search status polling configuration.
//!
//! Invariants:
//! - `interval` defaults to 5 seconds.
//! - `None` for `max_polls` / `max_wait` means the wait is unbounded.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::serde_helpers::{duration_seconds, option_duration_seconds};
use crate::constants::{DEFAULT_MAX_POLL_ERRORS, DEFAULT_POLL_INTERVAL_SECS};

/// Controls how long the client keeps polling a running search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Delay between two status checks (serialized as seconds).
    #[serde(with = "duration_seconds", default = "default_poll_interval")]
    pub interval: Duration,
    /// Maximum number of status checks before giving up.
    #[serde(default)]
    pub max_polls: Option<u32>,
    /// Maximum total time spent waiting (serialized as seconds).
    #[serde(with = "option_duration_seconds", default)]
    pub max_wait: Option<Duration>,
    /// Consecutive transient status-check failures tolerated before the wait fails.
    #[serde(default = "default_max_poll_errors")]
    pub max_poll_errors: u32,
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS)
}

fn default_max_poll_errors() -> u32 {
    DEFAULT_MAX_POLL_ERRORS
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: default_poll_interval(),
            max_polls: None,
            max_wait: None,
            max_poll_errors: default_max_poll_errors(),
        }
    }
}
