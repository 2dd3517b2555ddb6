//! CLI command implementations.

pub mod results;
pub mod search;
pub mod searches;
pub mod session;

use anyhow::Result;
use serde_json::Value;

use crate::config_context::CommandContext;
use crate::formatters::{get_formatter, output_result};

/// Format a response value with the selected formatter and emit it.
pub(crate) fn emit_value(ctx: &CommandContext, value: &Value) -> Result<()> {
    let output = get_formatter(ctx.format).format_value(value)?;
    output_result(&output, ctx.output_file.as_ref())
}
