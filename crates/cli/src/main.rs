//! ArcSight CLI - Command-line interface for ArcSight Logger searches.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Execute Logger search commands via the shared client library.
//! - Format and display results in json, table or csv.
//!
//! Does NOT handle:
//! - REST API implementation (see `crates/client`).
//! - Long-term persistence of search results.
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Logs and progress go to stderr; stdout carries only command results.

mod args;
mod cancellation;
mod commands;
mod config_context;
mod dispatch;
mod error;
mod formatters;
mod progress;

use arcsight_client::{CancellationToken, MetricsCollector, MetricsExporter};
use arcsight_config::ConfigLoader;
use args::Cli;
use cancellation::{is_cancelled_error, print_cancelled_message};
use clap::Parser;
use config_context::CommandContext;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use formatters::OutputFormat;
use secrecy::SecretString;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    let (json_layer, text_layer) = if cli.log_json {
        (Some(fmt::layer().json().with_writer(std::io::stderr)), None)
    } else {
        (None, Some(fmt::layer().with_writer(std::io::stderr)))
    };
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(json_layer)
        .with(text_layer)
        .init();

    let format = match OutputFormat::from_str(&cli.output) {
        Ok(format) => format,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(ExitCode::ValidationError.as_i32());
        }
    };

    let _metrics_exporter = if let Some(ref bind_addr) = cli.metrics_bind {
        match MetricsExporter::install(bind_addr) {
            Ok(exporter) => {
                tracing::info!(
                    "Metrics exporter started on http://{}/metrics",
                    exporter.bind_addr()
                );
                Some(exporter)
            }
            Err(e) => {
                eprintln!("Failed to start metrics exporter: {}", e);
                std::process::exit(ExitCode::GeneralError.as_i32());
            }
        }
    } else {
        None
    };

    let loader = match build_loader(&cli) {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(ExitCode::from(&e).as_i32());
        }
    };

    // Create cancellation token and set up signal handling
    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        cancel_clone.cancel();
    });

    let ctx = CommandContext {
        loader,
        auth_token: cli
            .auth_token
            .filter(|token| !token.trim().is_empty())
            .map(|token| SecretString::from(token.trim().to_string())),
        metrics: cli.metrics_bind.as_ref().map(|_| MetricsCollector::new()),
        cancel,
        format,
        output_file: cli.output_file,
        quiet: cli.quiet,
    };

    let exit_code = match run_command(cli.command, &ctx).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Merge configuration: flags > environment > config file.
fn build_loader(cli: &Cli) -> Result<ConfigLoader, arcsight_config::ConfigError> {
    let mut loader = ConfigLoader::new();

    // Blank/whitespace-only values are ignored to allow fallback to env var
    if let Some(ref path) = cli.config_path
        && !path.to_string_lossy().trim().is_empty()
    {
        loader = loader.with_config_path(path.clone());
    }

    loader = loader.from_env()?.from_file()?;

    if let Some(ref url) = cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(ref username) = cli.username {
        loader = loader.with_username(username.clone());
    }
    if let Some(ref password) = cli.password {
        loader = loader.with_password(password.clone());
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(timeout_secs));
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }
    if let Some(dialect) = cli.login_dialect {
        loader = loader.with_login_dialect(dialect);
    }
    if let Some(secs) = cli.poll_interval {
        loader = loader.with_poll_interval(Duration::from_secs(secs));
    }
    if let Some(polls) = cli.max_polls {
        loader = loader.with_max_polls(polls);
    }
    if let Some(secs) = cli.max_wait {
        loader = loader.with_max_wait(Duration::from_secs(secs));
    }

    Ok(loader)
}
