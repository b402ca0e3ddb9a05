//! Metrics collection and exposition.
//!
//! # Metrics
//! - `follow_toggles_total` (counter): toggles by outcome
//!   (`followed`, `unfollowed`, `not_found`, `self_follow`)
//! - `follow_edges` (gauge): current number of follow edges
//! - `users_registered_total` (counter)
//! - `http_request_duration_seconds` (histogram): latency by method, status

use std::net::SocketAddr;
use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_toggle(outcome: &'static str) {
    ::metrics::counter!("follow_toggles_total", "outcome" => outcome).increment(1);
}

pub fn record_edge_count(count: usize) {
    ::metrics::gauge!("follow_edges").set(count as f64);
}

pub fn record_registration() {
    ::metrics::counter!("users_registered_total").increment(1);
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    ::metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Middleware timing every request.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let response = next.run(request).await;
    record_request(method.as_str(), response.status().as_u16(), start);
    response
}
