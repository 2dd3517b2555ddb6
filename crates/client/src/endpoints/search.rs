//! Search lifecycle endpoints: start, status, stop and close.

use reqwest::Client;
use tracing::debug;

use super::{
    CLOSE_PATH, SEARCH_PATH, STATUS_PATH, STOP_PATH, SearchPayload, read_json_body, send_request,
};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{SearchId, SearchOptions, SearchStarted, SearchStatusReport};

/// Start a search under `search_id`.
#[allow(clippy::too_many_arguments)]
pub async fn start_search(
    client: &Client,
    base_url: &str,
    token: &str,
    search_id: SearchId,
    query: &str,
    options: &SearchOptions,
    metrics: Option<&MetricsCollector>,
) -> Result<SearchStarted> {
    debug!(%search_id, query, "Starting search");

    let body = SearchPayload::new(token, search_id)
        .with("query", query)
        .with_options(options)?
        .with_extras(&options.extra)?
        .into_value();

    let url = format!("{}{}", base_url, SEARCH_PATH);
    let response = send_request(client.post(&url).json(&body), SEARCH_PATH, metrics).await?;
    let vendor = read_json_body(response).await?.unwrap_or_default();

    Ok(SearchStarted::from_response(search_id, vendor))
}

/// Fetch the current status of a search.
pub async fn search_status(
    client: &Client,
    base_url: &str,
    token: &str,
    search_id: SearchId,
    metrics: Option<&MetricsCollector>,
) -> Result<SearchStatusReport> {
    debug!(%search_id, "Getting search status");

    let body = SearchPayload::new(token, search_id).into_value();
    let url = format!("{}{}", base_url, STATUS_PATH);
    let response = send_request(client.post(&url).json(&body), STATUS_PATH, metrics).await?;

    let value = read_json_body(response).await?.ok_or_else(|| {
        ClientError::InvalidResponse("Empty search status response".to_string())
    })?;
    serde_json::from_value(value)
        .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse search status: {}", e)))
}

/// Halt a search while keeping the results found so far.
pub async fn stop_search(
    client: &Client,
    base_url: &str,
    token: &str,
    search_id: SearchId,
    metrics: Option<&MetricsCollector>,
) -> Result<()> {
    debug!(%search_id, "Stopping search");
    post_ids(client, base_url, STOP_PATH, token, search_id, metrics).await
}

/// Release every server-side resource held by a search.
pub async fn close_search(
    client: &Client,
    base_url: &str,
    token: &str,
    search_id: SearchId,
    metrics: Option<&MetricsCollector>,
) -> Result<()> {
    debug!(%search_id, "Closing search");
    post_ids(client, base_url, CLOSE_PATH, token, search_id, metrics).await
}

async fn post_ids(
    client: &Client,
    base_url: &str,
    path: &str,
    token: &str,
    search_id: SearchId,
    metrics: Option<&MetricsCollector>,
) -> Result<()> {
    let body = SearchPayload::new(token, search_id).into_value();
    let url = format!("{}{}", base_url, path);
    send_request(client.post(&url).json(&body), path, metrics).await?;
    Ok(())
}
