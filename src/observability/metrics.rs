//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define dispatch metrics (counts, latency)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `endpoint_dispatch_total` (counter): dispatches by pattern, method, outcome
//! - `endpoint_dispatch_duration_seconds` (histogram): latency by pattern, method
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - Labels use the route pattern, never the concrete path, to bound
//!   cardinality

use axum::http::Method;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

pub const DISPATCH_TOTAL: &str = "endpoint_dispatch_total";
pub const DISPATCH_DURATION: &str = "endpoint_dispatch_duration_seconds";

/// Install the Prometheus recorder and its scrape listener on `addr`.
///
/// Must run inside a Tokio runtime. Failures are logged; the host keeps
/// serving without metrics.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            metrics::describe_counter!(DISPATCH_TOTAL, "Dispatches by pattern, method and outcome");
            metrics::describe_histogram!(
                DISPATCH_DURATION,
                metrics::Unit::Seconds,
                "Time from route resolution to emitted response"
            );
            tracing::info!(address = %addr, "Metrics endpoint listening");
        }
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished dispatch.
pub fn record_dispatch(pattern: &str, method: &Method, outcome: &'static str, start: Instant) {
    let pattern = pattern.to_string();
    let method = method.to_string();

    metrics::counter!(
        DISPATCH_TOTAL,
        "pattern" => pattern.clone(),
        "method" => method.clone(),
        "outcome" => outcome,
    )
    .increment(1);
    metrics::histogram!(
        DISPATCH_DURATION,
        "pattern" => pattern,
        "method" => method,
    )
    .record(start.elapsed().as_secs_f64());
}
