//! Search identifiers, search requests and the search start response.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Client-generated identifier correlating every call of one search.
///
/// Sent to the Logger as `search_session_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchId(u64);

impl SearchId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for SearchId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for SearchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SearchId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

/// Format a timestamp the way the Logger search API expects it:
/// ISO-8601 with milliseconds and a numeric offset.
///
/// `2024-01-01T00:00:00.000+00:00`
pub fn format_logger_time<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    time.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string()
}

/// Typed options accepted by the search service.
///
/// Anything not modelled here goes in `extra` and is sent unmodified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Server-side search timeout in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discover_fields: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_summary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_search: Option<bool>,
    #[serde(skip)]
    pub extra: Map<String, Value>,
}

/// A query plus everything needed to start it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    /// Caller-chosen id; generated by the client when `None`.
    pub search_id: Option<SearchId>,
    pub options: SearchOptions,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            search_id: None,
            options: SearchOptions::default(),
        }
    }

    pub fn search_id(mut self, id: SearchId) -> Self {
        self.search_id = Some(id);
        self
    }

    /// Restrict the search to `[start, end]`.
    pub fn time_range<Tz>(mut self, start: &DateTime<Tz>, end: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.options.start_time = Some(format_logger_time(start));
        self.options.end_time = Some(format_logger_time(end));
        self
    }

    pub fn timeout_ms(mut self, timeout: u64) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    pub fn discover_fields(mut self, discover: bool) -> Self {
        self.options.discover_fields = Some(discover);
        self
    }

    pub fn summary_fields(mut self, fields: Vec<String>) -> Self {
        self.options.summary_fields = Some(fields);
        self
    }

    pub fn field_summary(mut self, enabled: bool) -> Self {
        self.options.field_summary = Some(enabled);
        self
    }

    pub fn local_search(mut self, local: bool) -> Self {
        self.options.local_search = Some(local);
        self
    }

    /// Add a pass-through option sent verbatim in the request body.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.extra.insert(key.into(), value.into());
        self
    }
}

/// Result of starting a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchStarted {
    /// Id to pass to every later call for this search.
    pub search_id: SearchId,
    /// Logger-side session id (only useful in the Logger web UI).
    pub session_id: Option<String>,
    /// Full vendor response.
    pub response: Value,
}

impl SearchStarted {
    pub(crate) fn from_response(search_id: SearchId, response: Value) -> Self {
        let session_id = match response.get("sessionId") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        Self {
            search_id,
            session_id,
            response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_format_logger_time_utc() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_logger_time(&t), "2024-01-01T00:00:00.000+00:00");
    }

    #[test]
    fn test_format_logger_time_keeps_offset() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let t = tz.with_ymd_and_hms(2024, 6, 30, 13, 45, 7).unwrap();
        assert_eq!(format_logger_time(&t), "2024-06-30T13:45:07.000+02:00");
    }

    #[test]
    fn test_search_id_parse_and_display() {
        let id: SearchId = " 1700000000123 ".parse().unwrap();
        assert_eq!(id.get(), 1_700_000_000_123);
        assert_eq!(id.to_string(), "1700000000123");
        assert!("abc".parse::<SearchId>().is_err());
    }

    #[test]
    fn test_search_started_reads_numeric_session_id() {
        let started =
            SearchStarted::from_response(SearchId::new(1), serde_json::json!({"sessionId": 42}));
        assert_eq!(started.session_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_request_builder_sets_options() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 2, 0, 0).unwrap();
        let request = SearchRequest::new("error")
            .time_range(&start, &end)
            .discover_fields(true)
            .option("custom", 5);

        assert_eq!(
            request.options.start_time.as_deref(),
            Some("2024-01-01T00:00:00.000+00:00")
        );
        assert_eq!(
            request.options.end_time.as_deref(),
            Some("2024-01-01T02:00:00.000+00:00")
        );
        assert_eq!(request.options.discover_fields, Some(true));
        assert_eq!(request.options.extra["custom"], 5);
    }
}
