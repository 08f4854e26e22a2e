//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gate_requests_blocked_total` (counter): requests rejected with 403
//! - `gate_requests_allowed_total` (counter): requests forwarded downstream
//! - `gate_blocklist_reloads_total` (counter): reloads by `outcome`
//! - `gate_blocklist_entries` (gauge): size of the current snapshot

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_blocked() {
    metrics::counter!("gate_requests_blocked_total").increment(1);
}

pub fn record_allowed() {
    metrics::counter!("gate_requests_allowed_total").increment(1);
}

pub fn record_reload(outcome: &'static str) {
    metrics::counter!("gate_blocklist_reloads_total", "outcome" => outcome).increment(1);
}

pub fn record_blocklist_size(entries: usize) {
    metrics::gauge!("gate_blocklist_entries").set(entries as f64);
}
