//! Centralized constants for the ArcSight Logger workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// =============================================================================
// Search & Polling Defaults
// =============================================================================

/// Default interval between search status checks in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Upper bound for the poll interval in seconds.
pub const MAX_POLL_INTERVAL_SECS: u64 = 600;

/// Consecutive transient status-check failures tolerated while waiting.
pub const DEFAULT_MAX_POLL_ERRORS: u32 = 3;

/// Default number of events requested per `events` call by the CLI.
pub const DEFAULT_EVENTS_LENGTH: u64 = 100;

/// Default search window for the CLI when no start time is given (2 hours).
pub const DEFAULT_SEARCH_WINDOW_SECS: i64 = 7200;
