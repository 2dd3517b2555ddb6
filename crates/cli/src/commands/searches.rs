//! Commands that inspect or end an existing search.
//!
//! All of them reuse the `--auth-token` session that started the search.

use anyhow::{Context, Result};
use arcsight_client::{SearchId, SearchStatus};
use serde_json::json;

use crate::cancellation::cancellable;
use crate::commands::emit_value;
use crate::config_context::CommandContext;
use crate::formatters::{get_formatter, output_result};
use crate::progress::Spinner;

pub async fn status(ctx: &CommandContext, search_id: SearchId) -> Result<()> {
    let client = ctx.token_client()?;
    let report = cancellable(&ctx.cancel, async {
        client
            .status(search_id)
            .await
            .with_context(|| format!("Failed to get status of search {}", search_id))
    })
    .await?;

    let output = get_formatter(ctx.format).format_status(&report)?;
    output_result(&output, ctx.output_file.as_ref())
}

/// Wait until the search is complete or failed, then print its final status.
///
/// A search that ends in `error` prints its status and fails the command.
pub async fn wait(ctx: &CommandContext, search_id: SearchId) -> Result<()> {
    let client = ctx.token_client()?;
    let spinner = Spinner::new(!ctx.quiet, format!("Waiting for search {}", search_id));

    let report = client
        .wait_with(search_id, client.poll_config(), Some(&ctx.cancel))
        .await
        .with_context(|| format!("Failed to wait for search {}", search_id))?;
    spinner.finish(report.status.as_str());

    let output = get_formatter(ctx.format).format_status(&report)?;
    output_result(&output, ctx.output_file.as_ref())?;

    if report.status == SearchStatus::Error {
        anyhow::bail!("Search {} failed", search_id);
    }
    Ok(())
}

pub async fn stop(ctx: &CommandContext, search_id: SearchId) -> Result<()> {
    let client = ctx.token_client()?;
    cancellable(&ctx.cancel, async {
        client
            .stop(search_id)
            .await
            .with_context(|| format!("Failed to stop search {}", search_id))
    })
    .await?;

    emit_value(ctx, &json!({ "search_id": search_id, "stopped": true }))
}

pub async fn close(ctx: &CommandContext, search_id: SearchId) -> Result<()> {
    let client = ctx.token_client()?;
    cancellable(&ctx.cancel, async {
        client
            .close(search_id)
            .await
            .with_context(|| format!("Failed to close search {}", search_id))
    })
    .await?;

    emit_value(ctx, &json!({ "search_id": search_id, "closed": true }))
}
