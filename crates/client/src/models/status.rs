//! Search status as reported by `/server/search/status`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Vendor-reported state of a search. Unrecognized strings are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SearchStatus {
    Starting,
    Running,
    Complete,
    Error,
    Unknown(String),
}

impl SearchStatus {
    /// `complete` and `error` end a search; nothing else does.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Error)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Complete => "complete",
            Self::Error => "error",
            Self::Unknown(s) => s,
        }
    }
}

impl From<String> for SearchStatus {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "starting" => Self::Starting,
            "running" => Self::Running,
            "complete" => Self::Complete,
            "error" => Self::Error,
            _ => Self::Unknown(s),
        }
    }
}

impl From<SearchStatus> for String {
    fn from(status: SearchStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a status response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchStatusReport {
    pub status: SearchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_type: Option<String>,
    /// Matching events found so far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit: Option<u64>,
    /// Events scanned so far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanned: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchStatusReport {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn is_complete(&self) -> bool {
        self.status == SearchStatus::Complete
    }
}
