//! Commands that fetch the results of an existing search.

use anyhow::{Context, Result};
use arcsight_client::{
    ChartOptions, ClientError, EventsOptions, SearchId, format_logger_time,
};
use chrono::{DateTime, FixedOffset};
use serde_json::Value;

use crate::args::PageArgs;
use crate::cancellation::cancellable;
use crate::commands::emit_value;
use crate::config_context::CommandContext;
use crate::formatters::{get_formatter, output_result};

pub async fn events(
    ctx: &CommandContext,
    search_id: SearchId,
    page: PageArgs,
    dir: Option<String>,
    fields: Option<Vec<String>>,
) -> Result<()> {
    let client = ctx.token_client()?;
    let mut options = EventsOptions {
        offset: page.offset,
        length: page.length,
        dir,
        fields,
        ..EventsOptions::default()
    };
    options.extra.extend(page.options);

    let events = cancellable(&ctx.cancel, async {
        client
            .events(search_id, &options)
            .await
            .with_context(|| format!("Failed to fetch events of search {}", search_id))
    })
    .await?;

    let output = get_formatter(ctx.format).format_events(&events)?;
    output_result(&output, ctx.output_file.as_ref())
}

pub async fn raw_events(
    ctx: &CommandContext,
    search_id: SearchId,
    row_ids: Vec<String>,
) -> Result<()> {
    let client = ctx.token_client()?;
    let raw = cancellable(&ctx.cancel, async {
        client
            .raw_events(search_id, &row_ids)
            .await
            .with_context(|| format!("Failed to fetch raw events of search {}", search_id))
    })
    .await?;

    emit_value(ctx, &raw)
}

pub async fn histogram(ctx: &CommandContext, search_id: SearchId) -> Result<()> {
    let client = ctx.token_client()?;
    let histogram = cancellable(&ctx.cancel, async {
        client
            .histogram(search_id)
            .await
            .with_context(|| format!("Failed to fetch histogram of search {}", search_id))
    })
    .await?;

    emit_value(ctx, &histogram)
}

/// Narrow the search to `[start, end]`; a Logger reply without a body prints `null`.
pub async fn drilldown(
    ctx: &CommandContext,
    search_id: SearchId,
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
) -> Result<()> {
    if start > end {
        return Err(
            ClientError::InvalidRequest("--start must not be after --end".to_string()).into(),
        );
    }
    let client = ctx.token_client()?;
    let (start, end) = (format_logger_time(&start), format_logger_time(&end));

    let result = cancellable(&ctx.cancel, async {
        client
            .drilldown(search_id, &start, &end)
            .await
            .with_context(|| format!("Failed to drill down into search {}", search_id))
    })
    .await?;

    emit_value(ctx, &result.unwrap_or(Value::Null))
}

pub async fn chart_data(ctx: &CommandContext, search_id: SearchId, page: PageArgs) -> Result<()> {
    let client = ctx.token_client()?;
    let mut options = ChartOptions {
        offset: page.offset,
        length: page.length,
        ..ChartOptions::default()
    };
    options.extra.extend(page.options);

    let chart = cancellable(&ctx.cancel, async {
        client
            .chart_data(search_id, &options)
            .await
            .with_context(|| format!("Failed to fetch chart data of search {}", search_id))
    })
    .await?;

    emit_value(ctx, &chart)
}
