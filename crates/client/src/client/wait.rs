//! Waiting for a search to finish.
//!
//! Responsibilities:
//! - Poll the search status until it is `complete` or `error`.
//! - Sleep the poll interval between checks, never before the first one.
//! - Enforce the optional limits on status checks and total wait time.
//! - Tolerate a bounded run of transient status failures.
//!
//! Does NOT handle:
//! - Stopping the search when the wait is abandoned; the caller decides.
//!
//! Invariants:
//! - At least one status check is made.
//! - A non-terminal status is never returned.
//! - Between two status checks at least `interval` elapses.

use std::future::Future;

use arcsight_config::PollConfig;
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

use crate::cancellation::CancellationToken;
use crate::client::LoggerClient;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{SearchId, SearchStatusReport};

impl LoggerClient {
    /// Wait for a search to reach a terminal status using the client's poll policy.
    pub async fn wait(&self, search_id: SearchId) -> Result<SearchStatusReport> {
        self.wait_with(search_id, &self.poll, None).await
    }

    /// Wait with an explicit poll policy and an optional cancellation token.
    ///
    /// Cancelling aborts the wait, including an in-flight status check, with
    /// [`ClientError::Cancelled`]; the search keeps running on the Logger.
    ///
    /// # Errors
    ///
    /// - [`ClientError::WaitExhausted`] after `max_polls` non-terminal checks.
    /// - [`ClientError::WaitTimedOut`] when the next sleep would pass `max_wait`.
    /// - The last status error once `max_poll_errors` checks in a row have failed,
    ///   or immediately for a non-transient error.
    pub async fn wait_with(
        &self,
        search_id: SearchId,
        policy: &PollConfig,
        cancel: Option<&CancellationToken>,
    ) -> Result<SearchStatusReport> {
        self.ensure_open(search_id)?;
        poll_until_terminal(search_id, policy, cancel, self.metrics.as_ref(), move || {
            self.status(search_id)
        })
        .await
    }
}

pub(crate) async fn poll_until_terminal<F, Fut>(
    search_id: SearchId,
    policy: &PollConfig,
    cancel: Option<&CancellationToken>,
    metrics: Option<&MetricsCollector>,
    mut check: F,
) -> Result<SearchStatusReport>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<SearchStatusReport>>,
{
    let started = Instant::now();
    let mut polls: u32 = 0;
    let mut failures: u32 = 0;

    loop {
        if cancel.is_some_and(CancellationToken::is_cancelled) {
            return Err(ClientError::Cancelled);
        }

        polls += 1;
        let outcome = match cancel {
            Some(token) => {
                tokio::select! {
                    outcome = check() => outcome,
                    _ = token.cancelled() => return Err(ClientError::Cancelled),
                }
            }
            None => check().await,
        };

        match outcome {
            Ok(report) => {
                failures = 0;
                if let Some(m) = metrics {
                    m.record_poll(report.status.as_str());
                }
                debug!(
                    %search_id,
                    poll = polls,
                    status = %report.status,
                    hit = ?report.hit,
                    scanned = ?report.scanned,
                    "Polled search status"
                );
                if report.is_terminal() {
                    return Ok(report);
                }
            }
            Err(e) if e.is_retryable() => {
                failures += 1;
                if let Some(m) = metrics {
                    m.record_poll("failed");
                }
                if failures >= policy.max_poll_errors {
                    return Err(e);
                }
                warn!(%search_id, poll = polls, failures, error = %e, "Status check failed, will retry");
            }
            Err(e) => return Err(e),
        }

        if let Some(max_polls) = policy.max_polls
            && polls >= max_polls
        {
            return Err(ClientError::WaitExhausted {
                search_id,
                attempts: polls,
            });
        }

        if let Some(max_wait) = policy.max_wait
            && started.elapsed() + policy.interval > max_wait
        {
            return Err(ClientError::WaitTimedOut {
                search_id,
                waited: started.elapsed(),
            });
        }

        match cancel {
            Some(token) => {
                tokio::select! {
                    _ = sleep(policy.interval) => {}
                    _ = token.cancelled() => return Err(ClientError::Cancelled),
                }
            }
            None => sleep(policy.interval).await,
        }
    }
}
