//! Result retrieval methods for [`LoggerClient`].

use serde_json::Value;

use crate::client::LoggerClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{ChartOptions, EventsOptions, EventsResult, SearchId};

impl LoggerClient {
    /// Fetch events. An empty vendor result is [`EventsResult::Empty`].
    pub async fn events(
        &self,
        search_id: SearchId,
        options: &EventsOptions,
    ) -> Result<EventsResult> {
        let token = self.open_search_token(search_id)?;
        endpoints::events(
            &self.http,
            &self.base_url,
            token,
            search_id,
            options,
            self.metrics.as_ref(),
        )
        .await
    }

    /// Fetch raw CEF events for row ids taken from an events table.
    pub async fn raw_events(&self, search_id: SearchId, row_ids: &[String]) -> Result<Value> {
        let token = self.open_search_token(search_id)?;
        endpoints::raw_events(
            &self.http,
            &self.base_url,
            token,
            search_id,
            row_ids,
            self.metrics.as_ref(),
        )
        .await
    }

    pub async fn histogram(&self, search_id: SearchId) -> Result<Value> {
        let token = self.open_search_token(search_id)?;
        endpoints::histogram(
            &self.http,
            &self.base_url,
            token,
            search_id,
            self.metrics.as_ref(),
        )
        .await
    }

    /// Narrow a search to a time window; times use the Logger format
    /// (see [`crate::models::format_logger_time`]).
    pub async fn drilldown(
        &self,
        search_id: SearchId,
        start_time: &str,
        end_time: &str,
    ) -> Result<Option<Value>> {
        let token = self.open_search_token(search_id)?;
        endpoints::drilldown(
            &self.http,
            &self.base_url,
            token,
            search_id,
            start_time,
            end_time,
            self.metrics.as_ref(),
        )
        .await
    }

    pub async fn chart_data(&self, search_id: SearchId, options: &ChartOptions) -> Result<Value> {
        let token = self.open_search_token(search_id)?;
        endpoints::chart_data(
            &self.http,
            &self.base_url,
            token,
            search_id,
            options,
            self.metrics.as_ref(),
        )
        .await
    }
}
