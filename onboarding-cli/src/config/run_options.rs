//! Optional overrides for a CLI run (command-line flags or programmatic).
//!
//! Used by [`CliConfig::apply_options`](super::CliConfig::apply_options) and
//! [`run_with_options`](crate::run_with_options).

use onboarding::AssetsPrefetchMode;

/// Overrides applied on top of the env-based [`CliConfig`](super::CliConfig).
///
/// Only set fields override; `verbose` always wins.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Prefetch policy (`--prefetch`).
    pub prefetch_mode: Option<AssetsPrefetchMode>,
    /// Simulated per-screen asset latency in milliseconds (`--asset-latency-ms`).
    pub asset_latency_ms: Option<u64>,
    /// Host loading view identifier (`--loading-view`).
    pub custom_loading_view: Option<String>,
    /// Debug logs for the engine (`--verbose`).
    pub verbose: bool,
}
