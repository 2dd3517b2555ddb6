//! Result retrieval endpoints.
//!
//! None of these responses are cached; every call goes to the Logger.

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::{
    CHART_DATA_PATH, DRILLDOWN_PATH, EVENTS_PATH, HISTOGRAM_PATH, RAW_EVENTS_PATH, SearchPayload,
    read_json_body, send_request,
};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{ChartOptions, EventsOptions, EventsResult, SearchId};

async fn post_payload(
    client: &Client,
    base_url: &str,
    path: &str,
    payload: SearchPayload,
    metrics: Option<&MetricsCollector>,
) -> Result<Option<Value>> {
    let url = format!("{}{}", base_url, path);
    let response = send_request(client.post(&url).json(&payload.into_value()), path, metrics).await?;
    read_json_body(response).await
}

fn require_body(body: Option<Value>, what: &str) -> Result<Value> {
    body.ok_or_else(|| ClientError::InvalidResponse(format!("Empty {} response", what)))
}

/// Fetch events for a search.
pub async fn events(
    client: &Client,
    base_url: &str,
    token: &str,
    search_id: SearchId,
    options: &EventsOptions,
    metrics: Option<&MetricsCollector>,
) -> Result<EventsResult> {
    debug!(%search_id, offset = ?options.offset, length = ?options.length, "Getting events");

    let payload = SearchPayload::new(token, search_id)
        .with_options(options)?
        .with_extras(&options.extra)?;
    let body = post_payload(client, base_url, EVENTS_PATH, payload, metrics).await?;
    EventsResult::from_body(body)
}

/// Fetch raw CEF events for the given row ids.
pub async fn raw_events(
    client: &Client,
    base_url: &str,
    token: &str,
    search_id: SearchId,
    row_ids: &[String],
    metrics: Option<&MetricsCollector>,
) -> Result<Value> {
    debug!(%search_id, rows = row_ids.len(), "Getting raw events");

    let payload = SearchPayload::new(token, search_id).with("row_ids", row_ids.to_vec());
    let body = post_payload(client, base_url, RAW_EVENTS_PATH, payload, metrics).await?;
    require_body(body, "raw events")
}

/// Fetch the histogram for a search.
pub async fn histogram(
    client: &Client,
    base_url: &str,
    token: &str,
    search_id: SearchId,
    metrics: Option<&MetricsCollector>,
) -> Result<Value> {
    debug!(%search_id, "Getting histogram");

    let payload = SearchPayload::new(token, search_id);
    let body = post_payload(client, base_url, HISTOGRAM_PATH, payload, metrics).await?;
    require_body(body, "histogram")
}

/// Narrow a finished search to `[start_time, end_time]`.
///
/// The Logger usually answers 204, which is returned as `None`.
#[allow(clippy::too_many_arguments)]
pub async fn drilldown(
    client: &Client,
    base_url: &str,
    token: &str,
    search_id: SearchId,
    start_time: &str,
    end_time: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Option<Value>> {
    debug!(%search_id, start_time, end_time, "Drilling down");

    let payload = SearchPayload::new(token, search_id)
        .with("start_time", start_time)
        .with("end_time", end_time);
    post_payload(client, base_url, DRILLDOWN_PATH, payload, metrics).await
}

/// Fetch aggregated chart data for a search.
pub async fn chart_data(
    client: &Client,
    base_url: &str,
    token: &str,
    search_id: SearchId,
    options: &ChartOptions,
    metrics: Option<&MetricsCollector>,
) -> Result<Value> {
    debug!(%search_id, "Getting chart data");

    let payload = SearchPayload::new(token, search_id)
        .with_options(options)?
        .with_extras(&options.extra)?;
    let body = post_payload(client, base_url, CHART_DATA_PATH, payload, metrics).await?;
    require_body(body, "chart data")
}
