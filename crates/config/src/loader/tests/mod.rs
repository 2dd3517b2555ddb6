//! Tests for the configuration loader.
//!
//! Responsibilities:
//! - Test builder methods, validation, and precedence.
//! - Test environment variable handling.
//! - Test JSON config file loading.
//! - Test `.env` loading and its `DOTENV_DISABLED` gate.
//!
//! Invariants:
//! - Tests that touch process-global state use `serial_test` and `env_lock()`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

pub mod builder_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}
