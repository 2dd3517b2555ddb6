//! Metrics collection for Logger API calls.
//!
//! This module provides metrics collection for Logger API calls, including:
//! - Request latency histograms
//! - Request and error counters
//! - Search status poll counters
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (see [`crate::metrics_exporter`])
//! - Persistent storage of metrics
//!
//! # Invariants
//! - All metrics use consistent label names: `endpoint`, `method`, `status`, `error_category`
//! - Metric recording is infallible and never disrupts API calls
//! - Zero-cost when no metrics recorder is installed

use crate::error::ClientError;
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "arcsight_api_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "arcsight_api_requests_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "arcsight_api_errors_total";

/// Metric name for search status poll counter.
pub const METRIC_SEARCH_POLLS_TOTAL: &str = "arcsight_search_polls_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport-level errors (connection refused, DNS, etc.)
    Transport,
    /// HTTP 4xx client errors
    Http4xx,
    /// HTTP 5xx server errors
    Http5xx,
    /// Login rejected or token missing
    Auth,
    /// Unparseable vendor response
    Protocol,
    /// Request timeout
    Timeout,
    /// TLS/SSL errors
    Tls,
    /// Unknown/unclassified errors
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Protocol => "protocol",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Tls => "tls",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    /// Categorize a ClientError for metrics purposes.
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::Timeout(_) | ClientError::WaitTimedOut { .. } => ErrorCategory::Timeout,
            ClientError::ConnectionRefused(_) => ErrorCategory::Transport,
            ClientError::TlsError(_) => ErrorCategory::Tls,
            ClientError::AuthFailed(_) | ClientError::NotAuthenticated => ErrorCategory::Auth,
            ClientError::InvalidResponse(_) => ErrorCategory::Protocol,
            ClientError::ApiError { status, .. } => {
                if (400..500).contains(status) {
                    ErrorCategory::Http4xx
                } else if (500..600).contains(status) {
                    ErrorCategory::Http5xx
                } else {
                    ErrorCategory::Unknown
                }
            }
            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_request() {
                    ErrorCategory::Transport
                } else {
                    ErrorCategory::Unknown
                }
            }
            _ => ErrorCategory::Unknown,
        }
    }
}

/// Metrics collector for Logger API calls.
///
/// Thin wrapper around the `metrics` crate macros with consistent labels.
///
/// # Example
///
/// ```rust,ignore
/// use arcsight_client::metrics::MetricsCollector;
///
/// let collector = MetricsCollector::new();
/// collector.record_request_duration("/server/search", "POST", Duration::from_millis(150), Some(200));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create a new, enabled metrics collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if metrics collection is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of an API request.
    ///
    /// `status` is `None` when the request failed before a response arrived.
    pub fn record_request_duration(
        &self,
        endpoint: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a request attempt.
    pub fn record_request(&self, endpoint: &str, method: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
        )
        .increment(1);
    }

    /// Record an error.
    pub fn record_error(&self, endpoint: &str, method: &str, category: ErrorCategory) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "error_category" => category.as_str(),
        )
        .increment(1);
    }

    /// Record an error from a ClientError, categorizing it automatically.
    pub fn record_client_error(&self, endpoint: &str, method: &str, error: &ClientError) {
        let category = ErrorCategory::from(error);
        self.record_error(endpoint, method, category);
    }

    /// Record one status check performed by a wait loop.
    pub fn record_poll(&self, status: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_SEARCH_POLLS_TOTAL,
            "status" => status.to_string(),
        )
        .increment(1);
    }
}
