//! Metrics collection and exposition.
//!
//! # Metrics
//! - `planner_requests_total` (counter): requests by action, method, status
//! - `planner_request_duration_seconds` (histogram): latency by action
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Labels use route action labels, never raw paths

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(
            address = %addr,
            error = %e,
            "Failed to install metrics exporter"
        ),
    }
}

/// Record one finished request.
pub fn record_request(action: &'static str, method: &str, status: u16, start: Instant) {
    ::metrics::counter!(
        "planner_requests_total",
        "action" => action,
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("planner_request_duration_seconds", "action" => action)
        .record(start.elapsed().as_secs_f64());
}
