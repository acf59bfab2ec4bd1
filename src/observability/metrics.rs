//! Metrics collection and exposition.
//!
//! # Metrics
//! - `guardian_files_validated_total` (counter): files validated, by `valid`
//! - `guardian_placeholder_results_total` (counter): tasks that failed outside validation
//! - `guardian_plugin_failures_total` (counter): failed plugin calls, by `plugin`
//! - `guardian_cycles_total` (counter): completed validation cycles
//! - `guardian_cycle_duration_seconds` (histogram): discovery to publish

use std::net::SocketAddr;
use std::time::Instant;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_file_result(valid: bool) {
    counter!("guardian_files_validated_total", "valid" => valid.to_string()).increment(1);
}

pub fn record_placeholder() {
    counter!("guardian_placeholder_results_total").increment(1);
}

pub fn record_plugin_failure(plugin: &str) {
    counter!("guardian_plugin_failures_total", "plugin" => plugin.to_string()).increment(1);
}

pub fn record_cycle(start: Instant) {
    counter!("guardian_cycles_total").increment(1);
    histogram!("guardian_cycle_duration_seconds").record(start.elapsed().as_secs_f64());
}
