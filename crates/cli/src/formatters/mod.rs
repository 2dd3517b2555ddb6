//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide multiple output formats: JSON, Table, and CSV.
//! - Render event tables as keyed records, and every other Logger response
//!   (status, histogram, chart data, raw events) as flattened key/value data.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings; see `common::output_result`).
//!
//! Invariants:
//! - Tables use tab-separation for consistent alignment in standard terminals.
//!
//! ## Empty-State Handling
//!
//! | Format | Empty State Behavior | Example |
//! |--------|---------------------|---------|
//! | JSON | Valid empty structure | `[]` |
//! | CSV | Headers only, no data (nothing when no columns are known) | `_rowId,name\n` |
//! | Table | Human message | `No events found.` |
//!
//! ## Missing/Null Value Handling
//!
//! | Format | Missing Value Representation |
//! |--------|------------------------------|
//! | JSON | `null` (via serde) |
//! | CSV | empty field |
//! | Table | `N/A` |

use anyhow::Result;
use arcsight_client::{EventsResult, SearchStatusReport};
use serde_json::Value;

mod common;
mod csv;
mod json;
mod table;

pub use common::output_result;
pub use csv::CsvFormatter;
pub use json::JsonFormatter;
pub use table::TableFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
}

impl OutputFormat {
    /// Parse from string.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            _ => anyhow::bail!("Invalid output format: {}. Valid options: json, table, csv", s),
        }
    }
}

/// Formatter trait for different output types.
pub trait Formatter {
    /// Format the events of a search.
    fn format_events(&self, events: &EventsResult) -> Result<String>;

    /// Format an arbitrary Logger response.
    fn format_value(&self, value: &Value) -> Result<String>;

    /// Format a search status report.
    fn format_status(&self, report: &SearchStatusReport) -> Result<String> {
        self.format_value(&serde_json::to_value(report)?)
    }
}

/// Get a formatter for the specified format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

#[cfg(test)]
mod tests;
