//! CSV formatter implementation.
//!
//! Responsibilities:
//! - Format events as RFC 4180 CSV with a header of field names.
//! - Format other responses as `key,value` rows of the flattened JSON.
//!
//! Quoting and escaping are delegated to the `csv` crate.

use anyhow::Result;
use arcsight_client::EventsResult;
use serde_json::Value;
use std::collections::BTreeMap;

use super::Formatter;
use super::common::{event_columns, flatten_json_object, format_json_value};

/// CSV formatter.
pub struct CsvFormatter;

fn into_string(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}

impl Formatter for CsvFormatter {
    fn format_events(&self, events: &EventsResult) -> Result<String> {
        let (columns, records) = event_columns(events);
        let mut writer = csv::Writer::from_writer(Vec::new());
        if columns.is_empty() {
            return into_string(writer);
        }

        writer.write_record(&columns)?;
        for record in &records {
            writer.write_record(
                columns
                    .iter()
                    .map(|column| record.get(column).map(format_json_value).unwrap_or_default()),
            )?;
        }
        into_string(writer)
    }

    fn format_value(&self, value: &Value) -> Result<String> {
        let mut flat = BTreeMap::new();
        flatten_json_object(value, "", &mut flat);

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["key", "value"])?;
        for (key, val) in &flat {
            writer.write_record([key, val])?;
        }
        into_string(writer)
    }
}
