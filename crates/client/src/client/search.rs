//! Search lifecycle methods for [`LoggerClient`].
//!
//! # What this module handles:
//! - Choosing the search id (caller-supplied or generated)
//! - Rejecting operations on searches closed through this client
//! - Status checks, stop and close
//!
//! # What this module does NOT handle:
//! - Request bodies and HTTP calls (in [`crate::endpoints`])
//! - Polling until completion (in `wait`)

use crate::client::LoggerClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{SearchId, SearchRequest, SearchStarted, SearchStatusReport};

impl LoggerClient {
    /// Start a search.
    ///
    /// Uses `request.search_id` when set, otherwise generates a fresh id.
    /// The returned [`SearchStarted::search_id`] addresses the search in
    /// every later call.
    ///
    /// # Errors
    ///
    /// - [`crate::ClientError::SearchClosed`] if the supplied id was closed earlier.
    /// - [`crate::ClientError::InvalidRequest`] if a pass-through option collides
    ///   with a field the client sets.
    /// - [`crate::ClientError::ApiError`] with the vendor body if the Logger rejects it.
    pub async fn start_search(&self, request: SearchRequest) -> Result<SearchStarted> {
        let search_id = match request.search_id {
            Some(id) => {
                self.ensure_open(id)?;
                self.ids.observe(id);
                id
            }
            None => self.ids.next_id(),
        };
        let token = self.session.bearer()?;

        endpoints::start_search(
            &self.http,
            &self.base_url,
            token,
            search_id,
            &request.query,
            &request.options,
            self.metrics.as_ref(),
        )
        .await
    }

    /// Start a search for `query` with default options and a generated id.
    pub async fn search(&self, query: &str) -> Result<SearchStarted> {
        self.start_search(SearchRequest::new(query)).await
    }

    /// Fetch the current status of a search.
    pub async fn status(&self, search_id: SearchId) -> Result<SearchStatusReport> {
        let token = self.open_search_token(search_id)?;
        endpoints::search_status(
            &self.http,
            &self.base_url,
            token,
            search_id,
            self.metrics.as_ref(),
        )
        .await
    }

    /// True once the search status is `complete`.
    pub async fn is_complete(&self, search_id: SearchId) -> Result<bool> {
        Ok(self.status(search_id).await?.is_complete())
    }

    /// Halt a running search; results found so far stay available.
    pub async fn stop(&self, search_id: SearchId) -> Result<()> {
        let token = self.open_search_token(search_id)?;
        endpoints::stop_search(
            &self.http,
            &self.base_url,
            token,
            search_id,
            self.metrics.as_ref(),
        )
        .await
    }

    /// Release the search on the Logger.
    ///
    /// After a successful close the id is rejected locally by every method.
    /// A failed close leaves the id usable so the close can be retried.
    pub async fn close(&self, search_id: SearchId) -> Result<()> {
        let token = self.open_search_token(search_id)?;
        endpoints::close_search(
            &self.http,
            &self.base_url,
            token,
            search_id,
            self.metrics.as_ref(),
        )
        .await?;

        self.mark_closed(search_id);
        Ok(())
    }
}
