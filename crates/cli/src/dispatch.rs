//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()` and `config_context`).
//!
//! Invariants:
//! - Commands are routed based on the top-level Commands enum variant.

use anyhow::Result;

use crate::args::Commands;
use crate::commands;
use crate::commands::search::SearchArgs;
use crate::config_context::CommandContext;

/// Dispatch a parsed subcommand to its handler.
pub(crate) async fn run_command(command: Commands, ctx: &CommandContext) -> Result<()> {
    match command {
        Commands::Login => commands::session::login(ctx).await,
        Commands::Logout => commands::session::logout(ctx).await,
        Commands::Search {
            query,
            start,
            end,
            search_id,
            no_wait,
            keep_open,
            discover_fields,
            local_search,
            search_timeout,
            length,
            options,
        } => {
            let args = SearchArgs {
                query,
                start,
                end,
                search_id,
                no_wait,
                keep_open,
                discover_fields,
                local_search,
                search_timeout,
                length,
                options,
            };
            commands::search::run(ctx, args).await
        }
        Commands::Status { id } => commands::searches::status(ctx, id.search_id).await,
        Commands::Wait { id } => commands::searches::wait(ctx, id.search_id).await,
        Commands::Stop { id } => commands::searches::stop(ctx, id.search_id).await,
        Commands::Close { id } => commands::searches::close(ctx, id.search_id).await,
        Commands::Events {
            id,
            page,
            dir,
            fields,
        } => commands::results::events(ctx, id.search_id, page, dir, fields).await,
        Commands::RawEvents { id, row_ids } => {
            commands::results::raw_events(ctx, id.search_id, row_ids).await
        }
        Commands::Histogram { id } => commands::results::histogram(ctx, id.search_id).await,
        Commands::Drilldown { id, start, end } => {
            commands::results::drilldown(ctx, id.search_id, start, end).await
        }
        Commands::ChartData { id, page } => {
            commands::results::chart_data(ctx, id.search_id, page).await
        }
    }
}
