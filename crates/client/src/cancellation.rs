//! Cooperative cancellation for long-running client operations.
//!
//! Responsibilities:
//! - Provide a small cancellation token that can be cloned across tasks and
//!   handed to [`crate::LoggerClient::wait_with`].
//!
//! Does NOT handle:
//! - Installing signal handlers (the CLI does that).
//! - Stopping a search server-side; cancelling a wait leaves the search running.
//!
//! Invariants:
//! - Once cancelled, a token remains cancelled forever.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::Notify;

/// Cancellation token usable across async tasks.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancellationToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel token (idempotent).
    pub fn cancel(&self) {
        let was_cancelled = self.cancelled.swap(true, Ordering::SeqCst);
        if !was_cancelled {
            self.notify.notify_waiters();
        }
    }

    /// True if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Await cancellation.
    ///
    /// The `notified()` future is created before the flag is checked so a
    /// concurrent `cancel()` cannot be missed.
    pub async fn cancelled(&self) {
        let notified = self.notify.notified();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}
