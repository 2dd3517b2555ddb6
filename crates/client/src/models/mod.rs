//! Data models for ArcSight Logger API requests and responses.

mod events;
mod search;
mod status;

pub use events::{ChartOptions, EventField, EventTable, EventsOptions, EventsResult};
pub use search::{SearchId, SearchOptions, SearchRequest, SearchStarted, format_logger_time};
pub use status::{SearchStatus, SearchStatusReport};
