//! JSON formatter implementation.
//!
//! Events are printed as an array of keyed records; everything else as the
//! Logger returned it, pretty-printed.

use anyhow::Result;
use arcsight_client::EventsResult;
use serde_json::Value;

use super::Formatter;
use super::common::event_columns;

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_events(&self, events: &EventsResult) -> Result<String> {
        let (_, records) = event_columns(events);
        Ok(serde_json::to_string_pretty(&records)?)
    }

    fn format_value(&self, value: &Value) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}
