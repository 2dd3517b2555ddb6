//! REST API endpoint implementations.
//!
//! Every function here performs exactly one POST against the Logger and maps
//! the response. Session state, closed-search tracking and polling live in
//! [`crate::client`].

mod auth;
mod payload;
mod request;
mod results;
mod search;

pub use auth::{login, logout};
pub use results::{chart_data, drilldown, events, histogram, raw_events};
pub use search::{close_search, search_status, start_search, stop_search};

pub use payload::RESERVED_FIELDS;
pub(crate) use payload::SearchPayload;
pub(crate) use request::{read_json_body, send_request};

/// Login service path.
pub const LOGIN_PATH: &str = "/core-service/rest/LoginService/login";
/// Logout service path.
pub const LOGOUT_PATH: &str = "/core-service/rest/LoginService/logout";
/// Start a search.
pub const SEARCH_PATH: &str = "/server/search";
/// Poll search status.
pub const STATUS_PATH: &str = "/server/search/status";
/// Fetch events.
pub const EVENTS_PATH: &str = "/server/search/events";
/// Fetch raw CEF events.
pub const RAW_EVENTS_PATH: &str = "/server/search/raw_events";
/// Fetch the histogram.
pub const HISTOGRAM_PATH: &str = "/server/search/histogram";
/// Narrow a finished search to a time window.
pub const DRILLDOWN_PATH: &str = "/server/search/drilldown";
/// Fetch aggregated chart data.
pub const CHART_DATA_PATH: &str = "/server/search/chart_data";
/// Halt a running search.
pub const STOP_PATH: &str = "/server/search/stop";
/// Release a search.
pub const CLOSE_PATH: &str = "/server/search/close";
