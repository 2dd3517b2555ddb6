//! Login and logout commands.

use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;

use crate::cancellation::cancellable;
use crate::commands::emit_value;
use crate::config_context::CommandContext;
use crate::formatters::output_result;

/// Log in and print the raw session token, suitable for `ARCSIGHT_AUTH_TOKEN`.
pub async fn login(ctx: &CommandContext) -> Result<()> {
    let mut client = ctx.credentialed_client()?;
    info!("Connecting to {}", client.base_url());

    let token = cancellable(&ctx.cancel, async {
        client.login().await.context("Failed to log in")
    })
    .await?;

    output_result(token.expose_secret(), ctx.output_file.as_ref())
}

/// Invalidate the `--auth-token` session.
pub async fn logout(ctx: &CommandContext) -> Result<()> {
    let mut client = ctx.token_client()?;

    cancellable(&ctx.cancel, async {
        client.logout().await.context("Failed to log out")
    })
    .await?;

    emit_value(ctx, &json!({ "logged_out": true }))
}
