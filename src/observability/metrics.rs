//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define request metrics (throughput, latency, status)
//! - Expose a Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `authapi_requests_total` (counter): requests by method, path, status
//! - `authapi_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Labels stay low-cardinality: the route table is static, so the raw
//!   path is a bounded label set
//! - The exporter runs on its own port, separate from the API listener

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics exporter"),
    }
}

/// Record one completed request.
pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("authapi_requests_total", &labels).increment(1);
    metrics::histogram!("authapi_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}
