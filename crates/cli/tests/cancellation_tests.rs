//! Integration tests for graceful Ctrl+C/SIGINT handling.
//!
//! These tests are Unix-only because they send SIGINT to child process.
//! We assert:
//! - exit code is 130
//! - stderr contains cancellation message
//! - nothing is printed to stdout

#![cfg(unix)]

mod common;

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn arcsight_cli_bin() -> &'static std::path::Path {
    assert_cmd::cargo::cargo_bin!("arcsight-cli")
}

fn send_sigint(pid: u32) {
    // SAFETY: standard Unix kill syscall
    unsafe {
        libc::kill(pid as i32, libc::SIGINT);
    }
}

/// Status requests hang for a minute and notify once seen.
async fn mount_slow_status(server: &MockServer) -> Arc<Notify> {
    let request_seen = Arc::new(Notify::new());
    let request_seen_clone = Arc::clone(&request_seen);

    Mock::given(method("POST"))
        .and(path("/server/search/status"))
        .respond_with(move |_req: &wiremock::Request| {
            request_seen_clone.notify_one();
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(60))
                .set_body_json(serde_json::json!({"status": "running"}))
        })
        .mount(server)
        .await;

    request_seen
}

async fn interrupt(mut command: tokio::process::Command, request_seen: Arc<Notify>) {
    let child = command
        .env("DOTENV_DISABLED", "1")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn arcsight-cli");

    let pid = child.id().expect("child pid");
    tokio::time::timeout(Duration::from_secs(5), request_seen.notified())
        .await
        .expect("expected status request before SIGINT");
    send_sigint(pid);

    let output = tokio::time::timeout(Duration::from_secs(5), child.wait_with_output())
        .await
        .expect("process should exit promptly")
        .expect("wait_with_output ok");

    assert_eq!(output.status.code(), Some(130));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Operation cancelled by user"));
    assert!(output.stdout.is_empty());
}

#[tokio::test]
async fn test_search_wait_ctrl_c_exits_130_with_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/server/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "sessionId": 1
        })))
        .mount(&server)
        .await;
    let request_seen = mount_slow_status(&server).await;

    let mut command = tokio::process::Command::new(arcsight_cli_bin());
    command
        .env("ARCSIGHT_BASE_URL", server.uri())
        .env("ARCSIGHT_AUTH_TOKEN", common::TEST_TOKEN)
        .args(["--quiet", "search", "name CONTAINS \"login\""]);

    interrupt(command, request_seen).await;
}

#[tokio::test]
async fn test_wait_command_ctrl_c_exits_130_with_message() {
    let server = MockServer::start().await;
    let request_seen = mount_slow_status(&server).await;

    let mut command = tokio::process::Command::new(arcsight_cli_bin());
    command
        .env("ARCSIGHT_BASE_URL", server.uri())
        .env("ARCSIGHT_AUTH_TOKEN", common::TEST_TOKEN)
        .args(["--quiet", "wait", "--search-id", "42"]);

    interrupt(command, request_seen).await;
}
