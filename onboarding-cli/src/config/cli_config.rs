//! CLI config: prefetch policy, simulated asset latency, loading view. Filled from env / .env.

use std::time::Duration;

use onboarding::{AssetsPrefetchMode, RunConfiguration};

use super::RunOptions;

/// Error type used across the CLI.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Upper bound on scripted screen presentations, so cyclic graphs terminate.
pub const DEFAULT_MAX_STEPS: usize = 256;

#[derive(Clone, Debug, PartialEq)]
pub struct CliConfig {
    pub prefetch_mode: AssetsPrefetchMode,
    /// Latency of the simulated prefetch service, for every screen and for "all assets".
    pub asset_latency: Duration,
    pub custom_loading_view: Option<String>,
    /// Presentations after which the scripted presenter gives up.
    pub max_steps: usize,
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            prefetch_mode: AssetsPrefetchMode::default(),
            asset_latency: Duration::ZERO,
            custom_loading_view: None,
            max_steps: DEFAULT_MAX_STEPS,
            verbose: false,
        }
    }
}

impl CliConfig {
    /// Fill config from env vars (and .env, when loaded by the caller).
    ///
    /// `ONBOARDING_PREFETCH_MODE` (`wait_for_all_done` | `wait_for_first_done` |
    /// `wait_for_screen_to_load[:ms]`), `ONBOARDING_ASSET_LATENCY_MS` and
    /// `ONBOARDING_CUSTOM_LOADING_VIEW` are optional; invalid values are errors.
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self::default();
        if let Ok(mode) = std::env::var("ONBOARDING_PREFETCH_MODE") {
            config.prefetch_mode = mode.parse()?;
        }
        if let Ok(ms) = std::env::var("ONBOARDING_ASSET_LATENCY_MS") {
            let ms: u64 = ms
                .trim()
                .parse()
                .map_err(|e| format!("invalid ONBOARDING_ASSET_LATENCY_MS {:?}: {}", ms, e))?;
            config.asset_latency = Duration::from_millis(ms);
        }
        config.custom_loading_view = std::env::var("ONBOARDING_CUSTOM_LOADING_VIEW")
            .ok()
            .filter(|v| !v.trim().is_empty());
        Ok(config)
    }

    /// Apply optional overrides from `RunOptions` to this config.
    pub fn apply_options(&mut self, options: &RunOptions) {
        if let Some(mode) = options.prefetch_mode {
            self.prefetch_mode = mode;
        }
        if let Some(ms) = options.asset_latency_ms {
            self.asset_latency = Duration::from_millis(ms);
        }
        if options.custom_loading_view.is_some() {
            self.custom_loading_view = options.custom_loading_view.clone();
        }
        self.verbose = options.verbose;
    }

    /// Library run configuration for this CLI config.
    pub fn to_run_configuration(&self) -> RunConfiguration {
        let config = RunConfiguration::default().with_prefetch_mode(self.prefetch_mode);
        match &self.custom_loading_view {
            Some(view) => config.with_custom_loading_view(view.clone()),
            None => config,
        }
    }
}
