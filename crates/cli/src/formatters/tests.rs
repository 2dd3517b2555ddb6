//! Tests for formatters module.

use super::common::{flatten_json_object, format_json_value, write_to_file};
use super::{CsvFormatter, Formatter, JsonFormatter, OutputFormat, TableFormatter};
use arcsight_client::{EventTable, EventsResult, SearchStatusReport};
use serde_json::{Value, json};
use std::collections::BTreeMap;

fn events() -> EventsResult {
    let table: EventTable = serde_json::from_value(json!({
        "fields": [
            {"name": "_rowId", "type": "string"},
            {"name": "name", "type": "string"},
            {"name": "priority", "type": "int"}
        ],
        "results": [
            ["r1", "Login failed, bad password", 5],
            ["r2", "Port scan", null]
        ]
    }))
    .unwrap();
    EventsResult::Events(table)
}

#[test]
fn test_output_format_from_str() {
    assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
    assert_eq!(OutputFormat::from_str("TABLE").unwrap(), OutputFormat::Table);
    assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
    assert!(OutputFormat::from_str("xml").is_err());
}

#[test]
fn test_json_events_are_keyed_records() {
    let output = JsonFormatter.format_events(&events()).unwrap();
    let parsed: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed[0]["_rowId"], "r1");
    assert_eq!(parsed[0]["priority"], 5);
    assert_eq!(parsed[1]["priority"], Value::Null);
}

#[test]
fn test_empty_events_per_format() {
    assert_eq!(JsonFormatter.format_events(&EventsResult::Empty).unwrap(), "[]");
    assert_eq!(
        TableFormatter.format_events(&EventsResult::Empty).unwrap(),
        "No events found.\n"
    );
    assert_eq!(CsvFormatter.format_events(&EventsResult::Empty).unwrap(), "");
}

#[test]
fn test_table_events_use_field_order_and_missing_marker() {
    let output = TableFormatter.format_events(&events()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "_rowId\tname\tpriority");
    assert_eq!(lines[1], "r1\tLogin failed, bad password\t5");
    assert_eq!(lines[2], "r2\tPort scan\tN/A");
}

#[test]
fn test_csv_events_are_quoted() {
    let output = CsvFormatter.format_events(&events()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "_rowId,name,priority");
    assert_eq!(lines[1], "r1,\"Login failed, bad password\",5");
    assert_eq!(lines[2], "r2,Port scan,");
}

#[test]
fn test_status_report_in_table_form() {
    let report: SearchStatusReport =
        serde_json::from_value(json!({"status": "running", "hit": 42, "scanned": 10500}))
            .unwrap();
    let output = TableFormatter.format_status(&report).unwrap();
    assert!(output.contains("status\trunning\n"));
    assert!(output.contains("hit\t42\n"));
}

#[test]
fn test_value_csv_flattens_nested_data() {
    let output = CsvFormatter
        .format_value(&json!({"rows": [["a", 1]], "total": 3}))
        .unwrap();
    assert_eq!(output, "key,value\nrows.0.0,a\nrows.0.1,1\ntotal,3\n");
}

#[test]
fn test_flatten_scalar_uses_value_key() {
    let mut flat = BTreeMap::new();
    flatten_json_object(&json!("CEF:0|ArcSight"), "", &mut flat);
    assert_eq!(flat["value"], "CEF:0|ArcSight");
}

#[test]
fn test_flatten_keeps_empty_containers() {
    let mut flat = BTreeMap::new();
    flatten_json_object(&json!({"message": [], "meta": {}}), "", &mut flat);
    assert_eq!(flat["message"], "[]");
    assert_eq!(flat["meta"], "{}");
}

#[test]
fn test_format_json_value() {
    assert_eq!(format_json_value(&json!("x")), "x");
    assert_eq!(format_json_value(&json!(1.5)), "1.5");
    assert_eq!(format_json_value(&Value::Null), "");
    assert_eq!(format_json_value(&json!([1, 2])), "[1,2]");
}

#[test]
fn test_write_to_file_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/out/events.json");
    write_to_file("[]", &path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
}
