//! Request execution shared by all endpoints.
//!
//! This module sends a single request (no retries), attaches the JSON
//! `Accept` header, records metrics and maps failures onto [`ClientError`].

use reqwest::header::ACCEPT;
use reqwest::{RequestBuilder, Response, StatusCode};
use std::time::Instant;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

const METHOD: &str = "POST";

/// Send a request and return the response if the status is 2xx.
///
/// # Errors
///
/// - [`ClientError::ApiError`] for non-2xx responses, with the response body as message.
/// - [`ClientError::Timeout`], [`ClientError::ConnectionRefused`],
///   [`ClientError::TlsError`] or [`ClientError::HttpError`] for transport failures.
pub async fn send_request(
    builder: RequestBuilder,
    endpoint: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    let builder = builder.header(ACCEPT, "application/json");

    if let Some(m) = metrics {
        m.record_request(endpoint, METHOD);
    }

    let start = Instant::now();
    let result = builder.send().await;
    let elapsed = start.elapsed();

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            let url = e
                .url()
                .map(|u| u.to_string())
                .unwrap_or_else(|| endpoint.to_string());
            let err = ClientError::from_transport(e, &url, elapsed);
            debug!(endpoint, error = %err, "Request failed before a response arrived");
            if let Some(m) = metrics {
                m.record_request_duration(endpoint, METHOD, elapsed, None);
                m.record_client_error(endpoint, METHOD, &err);
            }
            return Err(err);
        }
    };

    let status = response.status().as_u16();
    if let Some(m) = metrics {
        m.record_request_duration(endpoint, METHOD, elapsed, Some(status));
    }

    if response.status().is_success() {
        debug!(endpoint, status, ?elapsed, "Request succeeded");
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());
    let message = if body.trim().is_empty() {
        StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("empty response body")
            .to_string()
    } else {
        body.trim().to_string()
    };

    let err = ClientError::ApiError {
        status,
        url,
        message,
    };
    if let Some(m) = metrics {
        m.record_client_error(endpoint, METHOD, &err);
    }
    Err(err)
}

/// Read a JSON body, treating 204 and blank bodies as `None`.
pub async fn read_json_body(response: Response) -> Result<Option<serde_json::Value>> {
    if response.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let body = response.text().await?;
    if body.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(&body)
        .map(Some)
        .map_err(|e| ClientError::InvalidResponse(format!("Response is not valid JSON: {}", e)))
}
