//! Shared helpers for formatter implementations.

use anyhow::{Context, Result};
use arcsight_client::EventsResult;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Placeholder for missing or null values in human-facing output.
pub const DEFAULT_MISSING_VALUE: &str = "N/A";

/// Column names and rows of an events result, in field order.
pub fn event_columns(events: &EventsResult) -> (Vec<String>, Vec<Map<String, Value>>) {
    match events.table() {
        None => (Vec::new(), Vec::new()),
        Some(table) => (
            table.field_names().into_iter().map(str::to_string).collect(),
            table.records(),
        ),
    }
}

/// Flatten nested JSON into dot-notation keys (`a.b.0`).
pub fn flatten_json_object(value: &Value, prefix: &str, output: &mut BTreeMap<String, String>) {
    match value {
        Value::Array(arr) if !arr.is_empty() => {
            for (i, item) in arr.iter().enumerate() {
                flatten_json_object(item, &join_key(prefix, &i.to_string()), output);
            }
        }
        Value::Object(obj) if !obj.is_empty() => {
            for (key, val) in obj {
                flatten_json_object(val, &join_key(prefix, key), output);
            }
        }
        other => {
            let key = if prefix.is_empty() { "value" } else { prefix };
            output.insert(key.to_string(), format_json_value(other));
        }
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// Format a JSON value as a string for display.
///
/// Strings are returned without quotes; null becomes empty; arrays and
/// objects are compact JSON.
pub fn format_json_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(v).unwrap_or_default(),
    }
}

/// Like [`format_json_value`], with [`DEFAULT_MISSING_VALUE`] for empty values.
pub fn format_cell(v: Option<&Value>) -> String {
    match v.map(format_json_value) {
        Some(s) if !s.is_empty() => s,
        _ => DEFAULT_MISSING_VALUE.to_string(),
    }
}

/// Print formatted output to stdout, or write it to `output_file`.
pub fn output_result(output: &str, output_file: Option<&std::path::PathBuf>) -> Result<()> {
    if let Some(path) = output_file {
        write_to_file(output, path)
            .with_context(|| format!("Failed to write output to {}", path.display()))?;
        eprintln!("Results written to {}", path.display());
    } else if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
    Ok(())
}

/// Write formatted output to a file atomically.
///
/// Creates parent directories if needed, writes to a temp file in the same
/// directory, then renames it over `path`.
pub fn write_to_file(content: &str, path: &std::path::Path) -> Result<()> {
    use std::fs;
    use std::io::Write;
    use tempfile::NamedTempFile;

    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => std::path::Path::new("."),
    };
    fs::create_dir_all(parent_dir)
        .with_context(|| format!("Failed to create directory: {}", parent_dir.display()))?;

    let mut temp_file = NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Failed to create temp file in: {}", parent_dir.display()))?;
    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temp file")?;
    temp_file.flush().context("Failed to flush temp file")?;
    temp_file
        .persist(path)
        .with_context(|| format!("Failed to move temp file to {}", path.display()))?;
    Ok(())
}
