//! Event and chart result models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ClientError, Result};

/// Options for `/server/search/events`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
    /// `forward` or `backward`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(skip)]
    pub extra: Map<String, Value>,
}

impl EventsOptions {
    pub fn page(offset: u64, length: u64) -> Self {
        Self {
            offset: Some(offset),
            length: Some(length),
            ..Self::default()
        }
    }

    /// Add a pass-through option sent verbatim in the request body.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Options for `/server/search/chart_data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
    #[serde(skip)]
    pub extra: Map<String, Value>,
}

impl ChartOptions {
    /// Add a pass-through option sent verbatim in the request body.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Column description in an events response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventField {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Column-oriented events: `fields` names the columns of every `results` row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventTable {
    #[serde(default)]
    pub fields: Vec<EventField>,
    #[serde(default)]
    pub results: Vec<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EventTable {
    /// Column names in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// One map per row, keyed by field name.
    ///
    /// A row shorter than `fields` yields only the columns it has.
    pub fn records(&self) -> Vec<Map<String, Value>> {
        self.results
            .iter()
            .map(|row| {
                self.fields
                    .iter()
                    .zip(row)
                    .map(|(field, value)| (field.name.clone(), value.clone()))
                    .collect()
            })
            .collect()
    }
}

/// Outcome of an events fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum EventsResult {
    /// The Logger returned nothing for this search.
    Empty,
    Events(EventTable),
}

impl EventsResult {
    /// Interpret a response body; `None` means the body was empty.
    pub(crate) fn from_body(body: Option<Value>) -> Result<Self> {
        let value = match body {
            None | Some(Value::Null) => return Ok(Self::Empty),
            Some(value) => value,
        };

        match value {
            Value::Array(items) if items.is_empty() => Ok(Self::Empty),
            Value::Object(map) if map.is_empty() => Ok(Self::Empty),
            Value::Object(map) => {
                let table: EventTable = serde_json::from_value(Value::Object(map)).map_err(|e| {
                    ClientError::InvalidResponse(format!("Failed to parse events: {}", e))
                })?;
                if table.results.is_empty() {
                    Ok(Self::Empty)
                } else {
                    Ok(Self::Events(table))
                }
            }
            other => Err(ClientError::InvalidResponse(format!(
                "Unexpected events response: {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn table(&self) -> Option<&EventTable> {
        match self {
            Self::Empty => None,
            Self::Events(table) => Some(table),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
