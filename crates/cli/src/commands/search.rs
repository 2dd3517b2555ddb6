//! Search command implementation.
//!
//! Responsibilities:
//! - Run one search end to end: log in if needed, start, wait, fetch events,
//!   close, log out.
//! - With `--no-wait`, start the search and print what later commands need to
//!   address it.
//!
//! Does NOT handle:
//! - Commands on an existing search (see `searches` and `results`).
//!
//! Invariants:
//! - Unless `--keep-open` is given, a search started here is closed once the
//!   command stops using it, even when waiting or fetching failed.
//! - A session opened here is logged out on the same terms.
//! - After Ctrl+C nothing is cleaned up; the command exits immediately.

use anyhow::{Context, Result};
use arcsight_client::{
    ClientError, EventsOptions, EventsResult, LoggerClient, SearchId, SearchRequest, SearchStatus,
};
use arcsight_config::constants::DEFAULT_SEARCH_WINDOW_SECS;
use chrono::{DateTime, FixedOffset, Utc};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::cancellation::{cancellable, is_cancelled_error};
use crate::commands::emit_value;
use crate::config_context::CommandContext;
use crate::formatters::{get_formatter, output_result};
use crate::progress::Spinner;

/// Arguments of `search`, as parsed by clap.
pub struct SearchArgs {
    pub query: String,
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
    pub search_id: Option<SearchId>,
    pub no_wait: bool,
    pub keep_open: bool,
    pub discover_fields: bool,
    pub local_search: bool,
    pub search_timeout: Option<u64>,
    pub length: u64,
    pub options: Vec<(String, Value)>,
}

impl SearchArgs {
    /// Resolve the time range; the default window ends now.
    fn time_range(&self) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let end = self.end.unwrap_or_else(|| Utc::now().fixed_offset());
        let start = self
            .start
            .unwrap_or_else(|| end - chrono::Duration::seconds(DEFAULT_SEARCH_WINDOW_SECS));
        if start > end {
            return Err(
                ClientError::InvalidRequest("--start must not be after --end".to_string()).into(),
            );
        }
        Ok((start, end))
    }

    fn to_request(&self) -> Result<SearchRequest> {
        let (start, end) = self.time_range()?;
        let mut request = SearchRequest::new(self.query.clone()).time_range(&start, &end);
        if let Some(id) = self.search_id {
            request = request.search_id(id);
        }
        if self.discover_fields {
            request = request.discover_fields(true);
        }
        if self.local_search {
            request = request.local_search(true);
        }
        if let Some(timeout) = self.search_timeout {
            request = request.timeout_ms(timeout);
        }
        for (key, value) in &self.options {
            request = request.option(key.clone(), value.clone());
        }
        Ok(request)
    }
}

pub async fn run(ctx: &CommandContext, args: SearchArgs) -> Result<()> {
    let own_session = !ctx.has_token();
    let mut client = if own_session {
        ctx.credentialed_client()?
    } else {
        ctx.token_client()?
    };
    let request = args.to_request()?;

    if own_session {
        cancellable(&ctx.cancel, async {
            client.login().await.context("Failed to log in")
        })
        .await?;
    }

    info!(query = %args.query, "Starting search");
    let started = match cancellable(&ctx.cancel, async {
        client.start_search(request).await.context("Failed to start search")
    })
    .await
    {
        Ok(started) => started,
        Err(e) => {
            if own_session && !is_cancelled_error(&e) {
                logout_quietly(&mut client).await;
            }
            return Err(e);
        }
    };
    let search_id = started.search_id;

    if args.no_wait {
        let mut output = json!({
            "search_id": search_id,
            "session_id": started.session_id,
        });
        if own_session && let Some(token) = client.session_token() {
            output["auth_token"] = Value::String(token.expose_secret().to_string());
        }
        return emit_value(ctx, &output);
    }

    let outcome = wait_and_fetch(ctx, &client, search_id, args.length).await;
    if matches!(&outcome, Err(e) if is_cancelled_error(e)) {
        return outcome.map(|_| ());
    }

    if args.keep_open {
        eprintln!("Search {} left open", search_id);
        if own_session && let Some(token) = client.session_token() {
            eprintln!("Session token: {}", token.expose_secret());
        }
    } else {
        if let Err(e) = client.close(search_id).await {
            warn!(search_id = %search_id, error = %e, "Failed to close search");
        }
        if own_session {
            logout_quietly(&mut client).await;
        }
    }

    let events = outcome?;
    let output = get_formatter(ctx.format).format_events(&events)?;
    output_result(&output, ctx.output_file.as_ref())
}

async fn wait_and_fetch(
    ctx: &CommandContext,
    client: &LoggerClient,
    search_id: SearchId,
    length: u64,
) -> Result<EventsResult> {
    let spinner = Spinner::new(!ctx.quiet, format!("Waiting for search {}", search_id));
    let report = client
        .wait_with(search_id, client.poll_config(), Some(&ctx.cancel))
        .await
        .with_context(|| format!("Failed to wait for search {}", search_id))?;
    spinner.finish(report.status.as_str());

    if report.status == SearchStatus::Error {
        let detail = report
            .message
            .as_ref()
            .map(|m| format!(": {}", m))
            .unwrap_or_default();
        anyhow::bail!("Search {} failed{}", search_id, detail);
    }

    let options = EventsOptions {
        length: Some(length),
        ..EventsOptions::default()
    };
    cancellable(&ctx.cancel, async {
        client
            .events(search_id, &options)
            .await
            .with_context(|| format!("Failed to fetch events of search {}", search_id))
    })
    .await
}

async fn logout_quietly(client: &mut LoggerClient) {
    if let Err(e) = client.logout().await {
        warn!(error = %e, "Failed to log out");
    }
}
