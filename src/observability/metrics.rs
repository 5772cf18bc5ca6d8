//! Metrics collection and exposition.
//!
//! # Metrics
//! - `diagnostics_steps_total` (counter): step executions by step, outcome
//! - `hi_requests_total` (counter): `/hi` requests by whether `age` was supplied
//! - `diagnostics_run_duration_seconds` (histogram): wall time of one sequence
//!
//! Recording is a no-op until a recorder is installed, so library users and
//! tests pay nothing unless [`init_metrics`] runs.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and start its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);

    match builder.install() {
        Ok(_) => tracing::info!(address = %addr, "Metrics exporter started"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_step(step: &'static str, passed: bool) {
    let outcome = if passed { "passed" } else { "failed" };
    counter!("diagnostics_steps_total", "step" => step, "outcome" => outcome).increment(1);
}

pub fn record_hi_request(age_supplied: bool) {
    let supplied = if age_supplied { "true" } else { "false" };
    counter!("hi_requests_total", "age_supplied" => supplied).increment(1);
}

pub fn record_run(start_time: Instant) {
    histogram!("diagnostics_run_duration_seconds").record(start_time.elapsed().as_secs_f64());
}
