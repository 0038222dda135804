//! Deployment metrics.
//!
//! # Metrics
//! - `bridge_deploy_rpc_calls_total` (counter): RPC requests by method, outcome
//! - `bridge_deploy_migrations_total` (counter): migrations by network, outcome
//!
//! No exporter is installed here. Without a recorder the macros are no-ops;
//! an embedding process installs one to collect them.

use metrics::counter;

fn outcome(ok: bool) -> &'static str {
    if ok {
        "success"
    } else {
        "failure"
    }
}

/// Record one RPC request.
pub fn record_rpc_call(method: &'static str, ok: bool) {
    counter!(
        "bridge_deploy_rpc_calls_total",
        "method" => method,
        "outcome" => outcome(ok)
    )
    .increment(1);
}

/// Record the end state of one migration.
pub fn record_migration(network: &str, ok: bool) {
    counter!(
        "bridge_deploy_migrations_total",
        "network" => network.to_string(),
        "outcome" => outcome(ok)
    )
    .increment(1);
}
