//! Logging utilities for flow execution.
//!
//! Structured `tracing` records for run start/finish, presentations and
//! readiness waits. Analytics go through `EventSink`; these are operator logs.

use std::time::Duration;

use crate::config::AssetsPrefetchMode;

/// Log a run start.
pub fn log_flow_start(launch_screen_id: &str, mode: &AssetsPrefetchMode, screens: usize) {
    tracing::info!(launch_screen_id, %mode, screens, "Starting onboarding flow");
}

/// Log a rejected start (already running, or launch screen missing).
pub fn log_flow_start_rejected(launch_screen_id: &str, reason: &str) {
    tracing::warn!(launch_screen_id, reason, "Onboarding flow not started");
}

/// Log a screen handed to the presentation handle.
///
/// `how` is one of `set_root`, `push`, `present_modal`, `custom`.
pub fn log_screen_presented(screen_id: &str, how: &str) {
    tracing::debug!(screen_id, how, "Screen presented");
}

/// Log a readiness wait before presenting `screen_id`.
pub fn log_readiness_wait(screen_id: Option<&str>, timeout: Option<Duration>) {
    tracing::debug!(?screen_id, ?timeout, "Waiting for screen assets");
}

/// Log a readiness message that no longer matches the pending wait.
pub fn log_readiness_stale(ticket: u64) {
    tracing::debug!(ticket, "Ignoring stale readiness signal");
}

/// Log a message that arrived while no run is active.
pub fn log_ignored_without_run(what: &str) {
    tracing::debug!(what, "Ignored: no active onboarding run");
}

/// Log run completion.
pub fn log_flow_finished(collected: usize) {
    tracing::info!(collected, "Onboarding flow finished");
}

/// Log a host callback or presentation call that panicked.
pub fn log_host_call_panicked(what: &str) {
    tracing::error!(call = what, "Host call panicked; flow state is kept consistent");
}
