//! Metrics collection and exposition.
//!
//! # Metrics
//! - `redirect_requests_total` (counter): requests by destination, status
//! - `redirect_duration_seconds` (histogram): time from request to response
//!
//! Recording is a no-op until `init_metrics` installs the Prometheus exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_redirect(destination: &str, status: u16, start_time: Instant) {
    let destination = destination.to_string();
    let status = status.to_string();

    ::metrics::counter!(
        "redirect_requests_total",
        "destination" => destination.clone(),
        "status" => status.clone()
    )
    .increment(1);
    ::metrics::histogram!(
        "redirect_duration_seconds",
        "destination" => destination,
        "status" => status
    )
    .record(start_time.elapsed().as_secs_f64());
}
