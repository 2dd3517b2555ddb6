//! Shared test utilities for arcsight-cli integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Mount the Logger mocks most tests need.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.
//! - No `ARCSIGHT_*` variable leaks in from the host.

use assert_cmd::Command;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token used by commands that address an existing search.
#[allow(dead_code)]
pub const TEST_TOKEN: &str = "test-session-token";

/// Returns a hermetic `arcsight-cli` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - Host `ARCSIGHT_*` variables are cleared.
#[allow(dead_code)]
pub fn arcsight_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("arcsight-cli");

    cmd.env("DOTENV_DISABLED", "1");

    for var in [
        "ARCSIGHT_BASE_URL",
        "ARCSIGHT_USERNAME",
        "ARCSIGHT_PASSWORD",
        "ARCSIGHT_AUTH_TOKEN",
        "ARCSIGHT_SKIP_VERIFY",
        "ARCSIGHT_TIMEOUT",
        "ARCSIGHT_LOGIN_DIALECT",
        "ARCSIGHT_POLL_INTERVAL",
        "ARCSIGHT_MAX_POLLS",
        "ARCSIGHT_MAX_WAIT",
        "ARCSIGHT_CONFIG_PATH",
    ] {
        cmd.env_remove(var);
    }

    cmd
}

/// A hermetic command pointed at `base_url` and carrying [`TEST_TOKEN`].
#[allow(dead_code)]
pub fn token_cmd(base_url: &str) -> Command {
    let mut cmd = arcsight_cmd();
    cmd.env("ARCSIGHT_BASE_URL", base_url)
        .env("ARCSIGHT_AUTH_TOKEN", TEST_TOKEN);
    cmd
}

/// Mount a JSON response for a `/server/search*` endpoint sent with [`TEST_TOKEN`].
#[allow(dead_code)]
pub async fn mount_search_endpoint(
    server: &MockServer,
    endpoint: &str,
    response: ResponseTemplate,
) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .and(body_partial_json(
            serde_json::json!({ "user_session_id": TEST_TOKEN }),
        ))
        .respond_with(response)
        .mount(server)
        .await;
}
