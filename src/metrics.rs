//! Prometheus metrics for the catalog and inbox.

use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the global Prometheus recorder and return a handle for rendering.
///
/// Returns `None` if a recorder is already installed.
pub fn init_metrics() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!("Failed to install Prometheus recorder: {}", e);
            None
        }
    }
}

/// Record an admin write against a table.
pub fn record_write(entity: &'static str, action: &'static str) {
    counter!("unibridge_writes_total", "entity" => entity, "action" => action).increment(1);
}

/// Record a public form submission.
pub fn record_submission(kind: &'static str) {
    counter!("unibridge_submissions_total", "kind" => kind).increment(1);
}

/// Set the current unread message count.
pub fn unread_messages(count: i64) {
    gauge!("unibridge_unread_messages").set(count as f64);
}
