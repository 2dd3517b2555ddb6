//! Common test utilities for integration tests.
//!
//! This module provides shared helper functions and re-exports commonly used
//! types for testing the Logger client.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

#[allow(unused_imports)]
pub use arcsight_client::testing::{load_fixture, load_fixture_text};

#[allow(unused_imports)]
pub use arcsight_client::endpoints;
#[allow(unused_imports)]
pub use arcsight_client::{LoggerClient, SearchId, SessionToken};
#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token every authenticated test client carries.
#[allow(dead_code)]
pub const TEST_TOKEN: &str = "test-session-token";

/// A client for `mock_server` that is already logged in.
#[allow(dead_code)]
pub fn authed_client(mock_server: &MockServer) -> LoggerClient {
    LoggerClient::builder()
        .base_url(mock_server.uri())
        .session_token(SessionToken::new(TEST_TOKEN).expect("non-empty token"))
        .build()
        .expect("client should build")
}

/// In-memory log sink for asserting on `tracing` output.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

#[allow(dead_code)]
impl CapturedLogs {
    /// Install a DEBUG-level fmt subscriber writing here for the current thread.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(self.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
