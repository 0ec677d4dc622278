//! Observability utilities for the catalog service.
//!
//! This crate provides:
//! - Prometheus metrics recording and export
//! - [`GateMetricsRecorder`], the admission gate's metrics sink
//! - Axum middleware for automatic request metrics
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, GateMetricsRecorder};
//!
//! init_metrics()?;
//!
//! let gate = AdmissionGate::with_metrics(200, Arc::new(GateMetricsRecorder));
//!
//! let app = Router::new()
//!     .route("/metrics", get(metrics_handler));
//! ```

pub mod gate;
pub mod middleware;

pub use gate::GateMetricsRecorder;
pub use middleware::metrics_middleware;

// Re-export metrics macros for convenience
pub use metrics::{counter, gauge, histogram};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

pub const GATE_WAIT_DURATION: &str = "marketplace_db_semaphore_wait_duration_seconds";
pub const GATE_IN_USE: &str = "marketplace_db_semaphore_in_use";

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Initialize the Prometheus metrics recorder.
///
/// Call once at application startup. Later calls return the same handle.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;

        info!("Prometheus metrics recorder initialized");
        register_metric_descriptions();

        Ok(handle)
    })
}

/// Get the metrics handle (must call init_metrics first)
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for /metrics endpoint
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::{describe_counter, describe_gauge, describe_histogram, Unit};

    // HTTP metrics
    describe_counter!("http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "http_request_duration_seconds",
        Unit::Seconds,
        "HTTP request duration in seconds"
    );
    describe_counter!(
        "http_requests_errors_total",
        "Total number of HTTP request errors"
    );
    describe_gauge!(
        "http_requests_in_flight",
        "HTTP requests currently being served"
    );

    // Store admission gate
    describe_histogram!(
        GATE_WAIT_DURATION,
        Unit::Seconds,
        "Time spent waiting for a database admission permit"
    );
    describe_gauge!(
        GATE_IN_USE,
        "Database admission permits currently held"
    );
}
