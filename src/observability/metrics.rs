//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_requests_total` (counter): requests by method, status, route
//! - `api_request_duration_seconds` (histogram): dispatch latency by method, route
//!
//! Without an installed recorder every call is a no-op. Unrouted requests with a
//! non-standard method are labelled `other` to keep label cardinality bounded.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

const STANDARD_METHODS: [&str; 9] = [
    "GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS", "CONNECT", "TRACE",
];

fn method_label<'a>(method: &'a str, route: &str) -> &'a str {
    if route == "none" && !STANDARD_METHODS.contains(&method) {
        "other"
    } else {
        method
    }
}

/// Record one dispatched request.
pub fn record_request(method: &str, status: u16, route: &str, start_time: Instant) {
    let method = method_label(method, route);

    metrics::counter!(
        "api_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "route" => route.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "api_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start_time.elapsed().as_secs_f64());
}
