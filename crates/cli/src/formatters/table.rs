//! Table formatter implementation.
//!
//! Responsibilities:
//! - Render events as tab-separated columns in field order.
//! - Render other responses as `key<TAB>value` lines of the flattened JSON.

use anyhow::Result;
use arcsight_client::EventsResult;
use serde_json::Value;
use std::collections::BTreeMap;

use super::Formatter;
use super::common::{DEFAULT_MISSING_VALUE, event_columns, flatten_json_object, format_cell};

/// Table formatter.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_events(&self, events: &EventsResult) -> Result<String> {
        let (columns, records) = event_columns(events);
        if records.is_empty() {
            return Ok("No events found.\n".to_string());
        }

        let mut output = String::new();
        output.push_str(&columns.join("\t"));
        output.push('\n');
        for record in &records {
            let row: Vec<String> = columns
                .iter()
                .map(|column| format_cell(record.get(column)))
                .collect();
            output.push_str(&row.join("\t"));
            output.push('\n');
        }
        Ok(output)
    }

    fn format_value(&self, value: &Value) -> Result<String> {
        let mut flat = BTreeMap::new();
        flatten_json_object(value, "", &mut flat);

        let mut output = String::new();
        for (key, val) in flat {
            let val = if val.is_empty() {
                DEFAULT_MISSING_VALUE.to_string()
            } else {
                val
            };
            output.push_str(&format!("{}\t{}\n", key, val));
        }
        Ok(output)
    }
}
