//! Error types for the ArcSight Logger client.

use std::time::Duration;
use thiserror::Error;

use crate::models::SearchId;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during Logger client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Login was rejected or could not be performed.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// An operation that needs a session token was called before `login`.
    #[error("Not authenticated: log in first or supply a session token")]
    NotAuthenticated,

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-2xx response from the Logger. `message` carries the vendor body.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// The Logger answered with a body the client cannot interpret.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request was rejected locally before being sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Connection refused.
    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    /// TLS/SSL error.
    #[error("TLS error: {0}")]
    TlsError(String),

    /// A request timed out in transit.
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// The search was closed through this client and can no longer be used.
    #[error("Search {0} has been closed")]
    SearchClosed(SearchId),

    /// The wait gave up after its maximum number of status checks.
    #[error("Search {search_id} still running after {attempts} status checks")]
    WaitExhausted { search_id: SearchId, attempts: u32 },

    /// The wait reached its `max_wait` deadline while the search was still running.
    #[error("Search {search_id} still running after waiting {waited:?}")]
    WaitTimedOut { search_id: SearchId, waited: Duration },

    /// The caller cancelled the operation.
    #[error("Operation cancelled")]
    Cancelled,
}

impl ClientError {
    /// Check if this error is transient and the same request may succeed later.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError(_) | Self::Timeout(_) | Self::ConnectionRefused(_) => true,
            Self::ApiError { status, .. } => Self::is_retryable_status(*status),
            _ => false,
        }
    }

    /// Check if an HTTP status code is retryable.
    ///
    /// Retryable status codes:
    /// - 429: Too Many Requests (rate limiting)
    /// - 502: Bad Gateway (transient server error)
    /// - 503: Service Unavailable (transient server error)
    /// - 504: Gateway Timeout (transient server error)
    ///
    /// Non-retryable status codes (fail immediately):
    /// - 400, 401, 403, 404: Client errors
    /// - 500: Internal Server Error (typically indicates a bug, not transient)
    /// - 501: Not Implemented
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 502 | 503 | 504)
    }

    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::AuthFailed(_) | Self::NotAuthenticated | Self::ApiError { status: 401, .. }
        )
    }

    /// Classify a transport failure from reqwest.
    ///
    /// `elapsed` is how long the request ran before failing and is reported
    /// for timeouts.
    pub(crate) fn from_transport(err: reqwest::Error, url: &str, elapsed: Duration) -> Self {
        if err.is_timeout() {
            return Self::Timeout(elapsed);
        }

        if err.is_connect() {
            let chain = error_chain_text(&err);
            let lowered = chain.to_lowercase();
            if lowered.contains("certificate")
                || lowered.contains("tls")
                || lowered.contains("handshake")
            {
                return Self::TlsError(chain);
            }
            return Self::ConnectionRefused(url.to_string());
        }

        Self::HttpError(err)
    }
}

fn error_chain_text(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = inner.source();
    }
    parts.join(": ")
}
