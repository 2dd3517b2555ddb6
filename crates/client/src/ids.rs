//! Search identifier generation.
//!
//! Invariants:
//! - Ids are the current Unix time in milliseconds, bumped when needed so that
//!   every id handed out by one generator is strictly greater than the last.
//! - Caller-supplied ids passed to [`SearchIdGenerator::observe`] are never
//!   handed out again.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::SearchId;

/// Thread-safe, strictly increasing search id source.
#[derive(Debug, Default)]
pub struct SearchIdGenerator {
    last: AtomicU64,
}

impl SearchIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id based on the wall clock.
    pub fn next_id(&self) -> SearchId {
        let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
        self.next_at(now)
    }

    /// Next id as if the clock read `now_ms`.
    pub fn next_at(&self, now_ms: u64) -> SearchId {
        let step = |last: u64| now_ms.max(last.saturating_add(1));
        let previous = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(step(last)))
        {
            Ok(prev) | Err(prev) => prev,
        };
        SearchId::new(step(previous))
    }

    /// Record an id chosen elsewhere so it is never generated.
    pub fn observe(&self, id: SearchId) {
        self.last.fetch_max(id.get(), Ordering::SeqCst);
    }
}
