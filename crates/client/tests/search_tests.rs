//! Search lifecycle tests: start, status, stop and close.
//!
//! # Invariants
//! - Every search body carries `search_session_id` and `user_session_id`
//! - Pass-through options reach the Logger unmodified
//! - A closed search is rejected locally without contacting the Logger

mod common;

use arcsight_client::{ClientError, SearchRequest, SearchStatus};
use chrono::{TimeZone, Utc};
use common::*;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};

#[tokio::test]
async fn test_start_search_with_caller_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/server/search"))
        .and(body_json(json!({
            "search_session_id": 1700000000123u64,
            "user_session_id": TEST_TOKEN,
            "query": "name CONTAINS \"password\""
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("search/search_started.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = authed_client(&mock_server);
    let started = client
        .start_search(
            SearchRequest::new("name CONTAINS \"password\"")
                .search_id(SearchId::new(1_700_000_000_123)),
        )
        .await
        .unwrap();

    assert_eq!(started.search_id, SearchId::new(1_700_000_000_123));
    assert_eq!(started.session_id.as_deref(), Some("1700000000123"));
}

#[tokio::test]
async fn test_generated_ids_are_distinct() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/server/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sessionId": 1})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = authed_client(&mock_server);
    let first = client.search("a").await.unwrap();
    let second = client.search("b").await.unwrap();

    assert!(second.search_id > first.search_id);
}

#[tokio::test]
async fn test_typed_options_and_extras_in_body() {
    let mock_server = MockServer::start().await;

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 1, 1, 2, 0, 0).unwrap();

    Mock::given(method("POST"))
        .and(path("/server/search"))
        .and(body_partial_json(json!({
            "query": "*",
            "start_time": "2024-01-01T00:00:00.000+00:00",
            "end_time": "2024-01-01T02:00:00.000+00:00",
            "discover_fields": true,
            "summary_fields": ["name", "priority"],
            "vendor_flag": {"nested": [1, "two", null]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sessionId": "7"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = authed_client(&mock_server);
    client
        .start_search(
            SearchRequest::new("*")
                .time_range(&start, &end)
                .discover_fields(true)
                .summary_fields(vec!["name".to_string(), "priority".to_string()])
                .option("vendor_flag", json!({"nested": [1, "two", null]})),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_reserved_extra_is_rejected_before_sending() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = authed_client(&mock_server);
    let err = client
        .start_search(SearchRequest::new("*").option("user_session_id", "other"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidRequest(ref m) if m.contains("user_session_id")));
}

#[tokio::test]
async fn test_search_http_error_carries_vendor_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/server/search"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string(r#"{"errors":[{"code":"bad query"}]}"#),
        )
        .mount(&mock_server)
        .await;

    let client = authed_client(&mock_server);
    let err = client.search("name =").await.unwrap_err();

    match err {
        ClientError::ApiError {
            status, message, ..
        } => {
            assert_eq!(status, 400);
            assert!(message.contains("bad query"));
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_requires_token() {
    let mock_server = MockServer::start().await;
    let client = LoggerClient::builder()
        .base_url(mock_server.uri())
        .build()
        .unwrap();

    assert!(matches!(
        client.search("*").await,
        Err(ClientError::NotAuthenticated)
    ));
}

#[tokio::test]
async fn test_status_parses_report() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/server/search/status"))
        .and(body_json(json!({
            "search_session_id": 42,
            "user_session_id": TEST_TOKEN
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("search/status_running.json")),
        )
        .mount(&mock_server)
        .await;

    let client = authed_client(&mock_server);
    let report = client.status(SearchId::new(42)).await.unwrap();

    assert_eq!(report.status, SearchStatus::Running);
    assert_eq!(report.hit, Some(42));
    assert_eq!(report.scanned, Some(10500));
    assert!(!client.is_complete(SearchId::new(42)).await.unwrap());
}

#[tokio::test]
async fn test_status_with_non_json_body_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/server/search/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = authed_client(&mock_server);
    assert!(matches!(
        client.status(SearchId::new(1)).await,
        Err(ClientError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_stop_posts_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/server/search/stop"))
        .and(body_json(json!({
            "search_session_id": 5,
            "user_session_id": TEST_TOKEN
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = authed_client(&mock_server);
    client.stop(SearchId::new(5)).await.unwrap();
    assert!(!client.is_closed(SearchId::new(5)));
}

#[tokio::test]
async fn test_close_then_status_is_rejected_locally() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/server/search/close"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/server/search/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "complete"})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = authed_client(&mock_server);
    let id = SearchId::new(99);
    client.close(id).await.unwrap();

    assert!(matches!(
        client.status(id).await,
        Err(ClientError::SearchClosed(closed)) if closed == id
    ));
    assert!(matches!(
        client.close(id).await,
        Err(ClientError::SearchClosed(_))
    ));
    assert!(matches!(
        client.start_search(SearchRequest::new("*").search_id(id)).await,
        Err(ClientError::SearchClosed(_))
    ));
}

#[tokio::test]
async fn test_failed_close_keeps_search_open() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/server/search/close"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = authed_client(&mock_server);
    let err = client.close(SearchId::new(3)).await.unwrap_err();

    assert!(matches!(err, ClientError::ApiError { status: 503, ref message, .. } if message == "Service Unavailable"));
    assert!(!client.is_closed(SearchId::new(3)));
}
