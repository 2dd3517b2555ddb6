//! Testing utilities for ArcSight client tests.
//!
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use arcsight_client::testing::load_fixture;
//!
//! let events = load_fixture("results/events.json");
//! ```

use std::path::{Path, PathBuf};

fn fixture_path(fixture_path: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(fixture_path)
}

/// Load a JSON fixture file from the fixtures directory.
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let content = load_fixture_text(fixture_path);
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// Load a fixture verbatim, e.g. an XML login response.
///
/// # Panics
/// If the fixture file cannot be read.
pub fn load_fixture_text(fixture_path: &str) -> String {
    let full_path = self::fixture_path(fixture_path);
    std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()))
}
