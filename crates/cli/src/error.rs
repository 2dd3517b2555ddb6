//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ClientError and ConfigError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see cancellation.rs for SIGINT handling).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use arcsight_client::ClientError;
use arcsight_config::ConfigError;

/// Structured exit codes for arcsight-cli.
///
/// These codes enable scripts to distinguish between different failure modes
/// and take appropriate action (retry, refresh credentials, fail fast, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Authentication failure - rejected login or missing/expired session token.
    ///
    /// Scripts should log in again.
    AuthenticationFailed = 2,

    /// Connection error - network, timeout, TLS or bad URL.
    ///
    /// Scripts may retry with exponential backoff.
    ConnectionError = 3,

    /// Search not found or already closed.
    NotFound = 4,

    /// Validation error - bad query, bad parameters or an unreadable response.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,

    /// Permission denied - insufficient privileges.
    PermissionDenied = 6,

    /// Rate limited - HTTP 429 Too Many Requests.
    RateLimited = 7,

    /// Service unavailable - HTTP 502/503/504.
    ServiceUnavailable = 8,

    /// The search did not finish within the allowed status checks or wait time.
    ///
    /// The search is still running; scripts may wait again.
    WaitExhausted = 9,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::AuthFailed(_) | ClientError::NotAuthenticated => {
                ExitCode::AuthenticationFailed
            }
            ClientError::ApiError { status: 401, .. } => ExitCode::AuthenticationFailed,

            ClientError::ConnectionRefused(_)
            | ClientError::Timeout(_)
            | ClientError::InvalidUrl(_)
            | ClientError::TlsError(_) => ExitCode::ConnectionError,

            ClientError::SearchClosed(_) => ExitCode::NotFound,
            ClientError::ApiError { status: 404, .. } => ExitCode::NotFound,

            ClientError::InvalidRequest(_) | ClientError::InvalidResponse(_) => {
                ExitCode::ValidationError
            }
            ClientError::ApiError { status: 400, .. } => ExitCode::ValidationError,

            ClientError::ApiError { status: 403, .. } => ExitCode::PermissionDenied,
            ClientError::ApiError { status: 429, .. } => ExitCode::RateLimited,
            ClientError::ApiError {
                status: 502 | 503 | 504,
                ..
            } => ExitCode::ServiceUnavailable,
            ClientError::ApiError { .. } => ExitCode::GeneralError,

            ClientError::WaitExhausted { .. } | ClientError::WaitTimedOut { .. } => {
                ExitCode::WaitExhausted
            }
            ClientError::Cancelled => ExitCode::Interrupted,

            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_timeout() {
                    ExitCode::ConnectionError
                } else {
                    ExitCode::GeneralError
                }
            }
        }
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::MissingAuth => ExitCode::AuthenticationFailed,
            _ => ExitCode::ValidationError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(config_err);
            }
        }

        ExitCode::GeneralError
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcsight_client::SearchId;
    use std::time::Duration;

    fn api(status: u16) -> ClientError {
        ClientError::ApiError {
            status,
            url: "https://logger:9000/server/search/status".to_string(),
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::AuthenticationFailed.as_i32(), 2);
        assert_eq!(ExitCode::WaitExhausted.as_i32(), 9);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
    }

    #[test]
    fn test_auth_errors() {
        assert_eq!(
            ExitCode::from(&ClientError::AuthFailed("bad password".to_string())),
            ExitCode::AuthenticationFailed
        );
        assert_eq!(
            ExitCode::from(&ClientError::NotAuthenticated),
            ExitCode::AuthenticationFailed
        );
        assert_eq!(ExitCode::from(&api(401)), ExitCode::AuthenticationFailed);
    }

    #[test]
    fn test_connection_errors() {
        assert_eq!(
            ExitCode::from(&ClientError::ConnectionRefused("logger:9000".to_string())),
            ExitCode::ConnectionError
        );
        assert_eq!(
            ExitCode::from(&ClientError::Timeout(Duration::from_secs(30))),
            ExitCode::ConnectionError
        );
        assert_eq!(
            ExitCode::from(&ClientError::InvalidUrl("ftp://x".to_string())),
            ExitCode::ConnectionError
        );
    }

    #[test]
    fn test_search_errors() {
        assert_eq!(
            ExitCode::from(&ClientError::SearchClosed(SearchId::new(7))),
            ExitCode::NotFound
        );
        assert_eq!(ExitCode::from(&api(404)), ExitCode::NotFound);
        assert_eq!(
            ExitCode::from(&ClientError::WaitExhausted {
                search_id: SearchId::new(7),
                attempts: 3
            }),
            ExitCode::WaitExhausted
        );
        assert_eq!(
            ExitCode::from(&ClientError::WaitTimedOut {
                search_id: SearchId::new(7),
                waited: Duration::from_secs(60)
            }),
            ExitCode::WaitExhausted
        );
        assert_eq!(
            ExitCode::from(&ClientError::Cancelled),
            ExitCode::Interrupted
        );
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(ExitCode::from(&api(400)), ExitCode::ValidationError);
        assert_eq!(ExitCode::from(&api(403)), ExitCode::PermissionDenied);
        assert_eq!(ExitCode::from(&api(429)), ExitCode::RateLimited);
        assert_eq!(ExitCode::from(&api(502)), ExitCode::ServiceUnavailable);
        assert_eq!(ExitCode::from(&api(503)), ExitCode::ServiceUnavailable);
        assert_eq!(ExitCode::from(&api(500)), ExitCode::GeneralError);
    }

    #[test]
    fn test_exit_code_ext_walks_context_chain() {
        let err = anyhow::Error::new(api(403)).context("Failed to fetch events");
        assert_eq!(err.exit_code(), ExitCode::PermissionDenied);

        let err = anyhow::Error::new(ConfigError::MissingBaseUrl).context("Failed to load config");
        assert_eq!(err.exit_code(), ExitCode::ValidationError);

        let err = anyhow::anyhow!("something else");
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
    }
}
