//! ArcSight Logger REST client.
//!
//! This crate drives the Logger search API: log in, start a search, wait for
//! it to finish, fetch events, histograms and chart data, then close the
//! search and log out.

mod auth;
pub mod cancellation;
pub mod client;
pub mod endpoints;
pub mod error;
mod ids;
pub mod metrics;
pub mod metrics_exporter;
pub mod models;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use arcsight_config::{LoginDialect, PollConfig};
pub use auth::{Credentials, SessionManager, SessionToken, parse_login_response};
pub use cancellation::CancellationToken;
pub use client::LoggerClient;
pub use client::builder::LoggerClientBuilder;
pub use error::{ClientError, Result};
pub use ids::SearchIdGenerator;
pub use metrics::{ErrorCategory, MetricsCollector};
pub use metrics_exporter::{MetricsExporter, MetricsExporterError};
pub use models::{
    ChartOptions, EventField, EventTable, EventsOptions, EventsResult, SearchId, SearchOptions,
    SearchRequest, SearchStarted, SearchStatus, SearchStatusReport, format_logger_time,
};
