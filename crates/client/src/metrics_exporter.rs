//! Prometheus metrics exporter for production observability.
//!
//! This module provides HTTP endpoint exposition of metrics collected
//! by the `metrics` crate. It uses `metrics-exporter-prometheus` to
//! serve metrics in Prometheus text format at `/metrics`.
//!
//! # Example
//!
//! ```rust,ignore
//! use arcsight_client::metrics_exporter::MetricsExporter;
//!
//! // Start exporter on 127.0.0.1:9464 (requires a Tokio runtime)
//! let exporter = MetricsExporter::install("127.0.0.1:9464")
//!     .expect("Failed to start metrics exporter");
//!
//! // Exporter runs until dropped
//! ```

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use tracing::info;

use crate::metrics::METRIC_REQUEST_DURATION;

/// Metrics exporter for Prometheus scraping.
///
/// When created, this installs a global PrometheusRecorder and spawns
/// an HTTP listener on the current Tokio runtime serving `/metrics`.
pub struct MetricsExporter {
    bind_addr: SocketAddr,
}

impl MetricsExporter {
    /// Install the Prometheus exporter as the global metrics recorder.
    ///
    /// # Arguments
    /// * `bind_addr` - Socket address to bind the HTTP server (e.g., "127.0.0.1:9464")
    ///
    /// # Errors
    /// Returns an error if:
    /// - The bind address is invalid
    /// - Another recorder is already installed
    /// - The HTTP server fails to start
    ///
    /// # Example
    /// ```rust,ignore
    /// let exporter = MetricsExporter::install("0.0.0.0:9464")?;
    /// ```
    pub fn install(bind_addr: &str) -> Result<Self, MetricsExporterError> {
        let addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| MetricsExporterError::InvalidBindAddress(bind_addr.to_string(), e))?;

        PrometheusBuilder::new()
            .set_buckets_for_metric(
                metrics_exporter_prometheus::Matcher::Full(METRIC_REQUEST_DURATION.to_string()),
                &[
                    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
                ],
            )?
            .with_http_listener(addr)
            .install()
            .map_err(|e| match e {
                BuildError::FailedToSetGlobalRecorder(_) => {
                    MetricsExporterError::RecorderAlreadyInstalled
                }
                other => MetricsExporterError::from(other),
            })?;

        info!(
            "Prometheus metrics exporter started on http://{}/metrics",
            addr
        );

        Ok(Self { bind_addr: addr })
    }

    /// Get the bind address.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

/// Errors that can occur when installing the metrics exporter.
#[derive(Debug, thiserror::Error)]
pub enum MetricsExporterError {
    /// Invalid bind address provided.
    #[error("Invalid bind address '{0}': {1}")]
    InvalidBindAddress(String, std::net::AddrParseError),

    /// A metrics recorder is already installed.
    #[error("A metrics recorder is already installed")]
    RecorderAlreadyInstalled,

    /// Failed to build the Prometheus recorder.
    #[error("Failed to build Prometheus recorder: {0}")]
    BuildError(String),
}

impl From<BuildError> for MetricsExporterError {
    fn from(err: BuildError) -> Self {
        MetricsExporterError::BuildError(err.to_string())
    }
}
