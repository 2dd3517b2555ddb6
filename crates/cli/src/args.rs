//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//! - Parse `key=value` pass-through options.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not build the client (see `config_context` module).

use std::path::PathBuf;

use arcsight_client::{LoginDialect, SearchId};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "arcsight-cli")]
#[command(about = "ArcSight Logger CLI - Run Logger searches from the command line", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  arcsight-cli search 'name CONTAINS \"password\"' --start 2024-01-01T00:00:00Z\n  export ARCSIGHT_AUTH_TOKEN=$(arcsight-cli login)\n  arcsight-cli search 'priority >= 7' --no-wait\n  arcsight-cli status --search-id 1700000000123\n  arcsight-cli events --search-id 1700000000123 --length 20 -o table\n  arcsight-cli close --search-id 1700000000123\n"
)]
pub struct Cli {
    /// Base URL of the Logger (e.g., https://logger.example.com:9000)
    #[arg(short, long, global = true, env = "ARCSIGHT_BASE_URL")]
    pub base_url: Option<String>,

    /// Username for login
    #[arg(short, long, global = true, env = "ARCSIGHT_USERNAME")]
    pub username: Option<String>,

    /// Password for login
    #[arg(short, long, global = true, env = "ARCSIGHT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Session token printed by `login`; required by commands that address an existing search
    #[arg(
        short,
        long,
        global = true,
        env = "ARCSIGHT_AUTH_TOKEN",
        hide_env_values = true
    )]
    pub auth_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "ARCSIGHT_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true, env = "ARCSIGHT_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// Login wire format: json or form
    #[arg(long, global = true, env = "ARCSIGHT_LOGIN_DIALECT")]
    pub login_dialect: Option<LoginDialect>,

    /// Seconds between search status checks while waiting
    #[arg(long, global = true, env = "ARCSIGHT_POLL_INTERVAL")]
    pub poll_interval: Option<u64>,

    /// Give up waiting after this many status checks
    #[arg(long, global = true, env = "ARCSIGHT_MAX_POLLS")]
    pub max_polls: Option<u32>,

    /// Give up waiting after this many seconds
    #[arg(long, global = true, env = "ARCSIGHT_MAX_WAIT")]
    pub max_wait: Option<u64>,

    /// Path to a JSON configuration file.
    ///
    /// Can also be set via ARCSIGHT_CONFIG_PATH environment variable.
    #[arg(long, global = true, env = "ARCSIGHT_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Output format (json, table, csv)
    #[arg(short, long, global = true, default_value = "json")]
    pub output: String,

    /// Write results to this file instead of stdout
    #[arg(long, global = true, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Suppress all progress output (spinners).
    ///
    /// Note: Progress indicators always write to STDERR; this flag disables them entirely.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines (on stderr; level set via RUST_LOG)
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Serve Prometheus metrics on this address (e.g., 127.0.0.1:9464)
    #[arg(long, global = true, value_name = "ADDR")]
    pub metrics_bind: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Identifies a search started earlier with the same session token.
#[derive(Args, Debug, Clone, Copy)]
pub struct SearchIdArg {
    /// Search id returned by `search --no-wait`
    #[arg(long, value_name = "ID")]
    pub search_id: SearchId,
}

/// Paging and pass-through options for result commands.
#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// Index of the first row to return
    #[arg(long)]
    pub offset: Option<u64>,

    /// Number of rows to return
    #[arg(long)]
    pub length: Option<u64>,

    /// Extra request field sent unmodified (repeatable, value parsed as JSON when possible)
    #[arg(long = "option", value_name = "KEY=VALUE", value_parser = parse_option)]
    pub options: Vec<(String, Value)>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and print the session token
    Login,

    /// Invalidate the session token
    Logout,

    /// Run a search: start, wait, fetch events, close
    Search {
        /// The Logger query (e.g., 'name CONTAINS "login"')
        query: String,

        /// Search start time (RFC 3339); defaults to two hours before --end
        #[arg(long, value_parser = parse_time)]
        start: Option<chrono::DateTime<chrono::FixedOffset>>,

        /// Search end time (RFC 3339); defaults to now
        #[arg(long, value_parser = parse_time)]
        end: Option<chrono::DateTime<chrono::FixedOffset>>,

        /// Use this search id instead of generating one
        #[arg(long, value_name = "ID")]
        search_id: Option<SearchId>,

        /// Return right after starting the search
        #[arg(long)]
        no_wait: bool,

        /// Do not close the search (or log out) when done
        #[arg(long)]
        keep_open: bool,

        /// Ask the Logger to discover fields
        #[arg(long)]
        discover_fields: bool,

        /// Search only the local Logger, not its peers
        #[arg(long)]
        local_search: bool,

        /// Server-side search timeout in milliseconds
        #[arg(long, value_name = "MS")]
        search_timeout: Option<u64>,

        /// Number of events to fetch
        #[arg(long, default_value_t = arcsight_config::constants::DEFAULT_EVENTS_LENGTH)]
        length: u64,

        /// Extra search field sent unmodified (repeatable)
        #[arg(long = "option", value_name = "KEY=VALUE", value_parser = parse_option)]
        options: Vec<(String, Value)>,
    },

    /// Show the status of a search
    Status {
        #[command(flatten)]
        id: SearchIdArg,
    },

    /// Wait until a search is complete or failed
    Wait {
        #[command(flatten)]
        id: SearchIdArg,
    },

    /// Fetch events of a search
    Events {
        #[command(flatten)]
        id: SearchIdArg,

        #[command(flatten)]
        page: PageArgs,

        /// Read direction: forward or backward
        #[arg(long)]
        dir: Option<String>,

        /// Comma-separated list of fields to return
        #[arg(long, value_delimiter = ',')]
        fields: Option<Vec<String>>,
    },

    /// Fetch raw CEF events for row ids
    RawEvents {
        #[command(flatten)]
        id: SearchIdArg,

        /// Row ids from the `_rowId` column of `events`
        #[arg(required = true)]
        row_ids: Vec<String>,
    },

    /// Fetch the event histogram of a search
    Histogram {
        #[command(flatten)]
        id: SearchIdArg,
    },

    /// Narrow a search to a time window
    Drilldown {
        #[command(flatten)]
        id: SearchIdArg,

        /// Window start (RFC 3339)
        #[arg(long, value_parser = parse_time)]
        start: chrono::DateTime<chrono::FixedOffset>,

        /// Window end (RFC 3339)
        #[arg(long, value_parser = parse_time)]
        end: chrono::DateTime<chrono::FixedOffset>,
    },

    /// Fetch aggregated chart data of a search
    ChartData {
        #[command(flatten)]
        id: SearchIdArg,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Stop a running search, keeping its results
    Stop {
        #[command(flatten)]
        id: SearchIdArg,
    },

    /// Close a search and release its resources
    Close {
        #[command(flatten)]
        id: SearchIdArg,
    },
}

/// Parse `key=value`; the value is JSON when it parses as JSON, a string otherwise.
pub(crate) fn parse_option(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

pub(crate) fn parse_time(raw: &str) -> Result<chrono::DateTime<chrono::FixedOffset>, String> {
    chrono::DateTime::parse_from_rfc3339(raw.trim())
        .map_err(|e| format!("invalid RFC 3339 time '{}': {}", raw, e))
}
