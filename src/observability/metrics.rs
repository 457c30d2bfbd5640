//! Metrics collection and exposition.
//!
//! # Metrics
//! - `provision_attempts_total` (counter): attempts by kind and outcome
//! - `provision_duration_seconds` (histogram): trigger latency by kind
//! - `ledger_sessions_opened_total` (counter): sessions opened, one per trigger
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed, so tests need no setup
//! - The Prometheus exporter is opt-in via `observability.metrics_enabled`

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::ledger::types::AccountKind;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one finished provisioning attempt.
pub fn record_attempt(kind: AccountKind, outcome: &'static str, elapsed: Duration) {
    counter!(
        "provision_attempts_total",
        "kind" => kind.as_str(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!("provision_duration_seconds", "kind" => kind.as_str())
        .record(elapsed.as_secs_f64());
}

/// Record that a ledger session was opened.
pub fn record_session_opened() {
    counter!("ledger_sessions_opened_total").increment(1);
}
