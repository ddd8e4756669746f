use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

use crate::error::MutationResult;

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub fn init_metrics() -> anyhow::Result<()> {
    if HANDLE.get().is_some() {
        return Ok(());
    }
    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = HANDLE.set(handle);
    Ok(())
}

pub fn render_metrics() -> String {
    HANDLE.get().map(|h| h.render()).unwrap_or_default()
}

/// Count a finished mutation and log why it was rejected, if it was.
pub fn record_mutation<T>(mutation: &'static str, result: &MutationResult<T>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(err) => {
            tracing::debug!(mutation, error = %err, "mutation rejected");
            err.outcome()
        }
    };
    metrics::counter!("catalog_mutations_total", "mutation" => mutation, "outcome" => outcome)
        .increment(1);
}
