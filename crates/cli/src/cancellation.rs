//! CLI cancellation utilities.
//!
//! Responsibilities:
//! - Define a single, recognizable `Cancelled` error used to signal user-initiated
//!   cancellation (Ctrl+C/SIGINT) through `anyhow::Result`.
//! - Race individual requests against the shared cancellation token.
//! - Centralize the cancellation message.
//!
//! Does NOT handle:
//! - Installing the signal handler (see `main`).
//! - The token itself, which lives in `arcsight_client` so waits can observe it.
//!
//! Invariants:
//! - A cancelled command never prints partial results to stdout.

use std::fmt;
use std::future::Future;

use arcsight_client::{CancellationToken, ClientError};

/// Marker error used to indicate user-driven cancellation.
#[derive(Debug, Clone, Copy)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Await `fut` unless the token fires first.
pub async fn cancellable<T, F>(cancel: &CancellationToken, fut: F) -> anyhow::Result<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    if cancel.is_cancelled() {
        return Err(Cancelled.into());
    }
    tokio::select! {
        result = fut => result,
        _ = cancel.cancelled() => Err(Cancelled.into()),
    }
}

/// Returns true if this anyhow error represents a cancellation.
pub fn is_cancelled_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause.is::<Cancelled>()
            || matches!(
                cause.downcast_ref::<ClientError>(),
                Some(ClientError::Cancelled)
            )
    })
}

/// Print standard cancellation message to stderr.
pub fn print_cancelled_message() {
    eprintln!("^C\nOperation cancelled by user");
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_is_cancelled_error_detects_marker_and_client_error() {
        assert!(is_cancelled_error(&anyhow::Error::new(Cancelled)));
        assert!(is_cancelled_error(
            &Err::<(), _>(ClientError::Cancelled)
                .context("Failed to wait for search")
                .unwrap_err()
        ));
        assert!(!is_cancelled_error(&anyhow::anyhow!("boom")));
    }

    #[tokio::test]
    async fn test_cancellable_passes_result_through() {
        let cancel = CancellationToken::new();
        let value = cancellable(&cancel, async { Ok(5) }).await.unwrap();
        assert_eq!(value, 5);
    }

    #[tokio::test]
    async fn test_cancellable_stops_pending_future() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let err = cancellable(&cancel, std::future::pending::<anyhow::Result<()>>())
            .await
            .unwrap_err();
        assert!(is_cancelled_error(&err));
    }

    #[tokio::test]
    async fn test_already_cancelled_token_short_circuits() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = cancellable(&cancel, async { Ok(()) }).await.unwrap_err();
        assert!(err.is::<Cancelled>());
    }
}
