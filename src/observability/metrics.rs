//! Metrics collection and exposition.
//!
//! # Metrics
//! - `intake_tokens_issued_total` (counter): CSRF tokens minted
//! - `intake_submissions_total{outcome}` (counter): pipeline outcomes
//! - `intake_rate_limited_total` (counter): requests over the ceiling
//!
//! # Design Decisions
//! - Counters only; the pipeline has no latency-sensitive fan-out
//! - Exporter is optional and off by default

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_token_issued() {
    metrics::counter!("intake_tokens_issued_total").increment(1);
}

pub fn record_submission(outcome: &'static str) {
    metrics::counter!("intake_submissions_total", "outcome" => outcome).increment(1);
}

pub fn record_rate_limited() {
    metrics::counter!("intake_rate_limited_total").increment(1);
}
