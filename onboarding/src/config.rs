//! Run configuration: prefetch policy, presentation style, loading view.
//!
//! Built in code with the `with_*` builders, or from strings (env / CLI) via
//! `AssetsPrefetchMode::from_str`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default per-screen wait for `AssetsPrefetchMode::WaitForScreenToLoad`.
pub const DEFAULT_SCREEN_LOAD_TIMEOUT: Duration = Duration::from_millis(500);

/// When to wait for prefetched assets before showing a screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetsPrefetchMode {
    /// Show the loading view until every asset is prefetched, then never wait again.
    WaitForAllDone,
    /// Prefetch lazily; only the launch screen waits (without timeout) for its assets.
    WaitForFirstDone,
    /// Prefetch lazily; every transition waits up to `timeout` for that screen's assets.
    WaitForScreenToLoad { timeout: Duration },
}

impl Default for AssetsPrefetchMode {
    fn default() -> Self {
        Self::WaitForScreenToLoad {
            timeout: DEFAULT_SCREEN_LOAD_TIMEOUT,
        }
    }
}

impl FromStr for AssetsPrefetchMode {
    type Err = String;

    /// Accepts `wait_for_all_done`, `wait_for_first_done`, `wait_for_screen_to_load`
    /// and `wait_for_screen_to_load:<millis>` (dashes work too).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        let (name, arg) = match normalized.split_once(':') {
            Some((name, arg)) => (name.to_string(), Some(arg.to_string())),
            None => (normalized, None),
        };
        match (name.as_str(), arg) {
            ("wait_for_all_done", None) => Ok(Self::WaitForAllDone),
            ("wait_for_first_done", None) => Ok(Self::WaitForFirstDone),
            ("wait_for_screen_to_load", None) => Ok(Self::default()),
            ("wait_for_screen_to_load", Some(ms)) => ms
                .parse::<u64>()
                .map(|ms| Self::WaitForScreenToLoad {
                    timeout: Duration::from_millis(ms),
                })
                .map_err(|_| format!("invalid timeout in prefetch mode: {}", s)),
            _ => Err(format!(
                "unknown prefetch mode: {} (use wait_for_all_done, wait_for_first_done, or wait_for_screen_to_load[:ms])",
                s
            )),
        }
    }
}

impl fmt::Display for AssetsPrefetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WaitForAllDone => write!(f, "wait_for_all_done"),
            Self::WaitForFirstDone => write!(f, "wait_for_first_done"),
            Self::WaitForScreenToLoad { timeout } => {
                write!(f, "wait_for_screen_to_load:{}", timeout.as_millis())
            }
        }
    }
}

/// Where the flow's root view is installed. Identifiers are opaque to the engine
/// and forwarded to the presentation handle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PresentationStyle {
    /// Replace the root of the host's active window.
    #[default]
    Default,
    /// Replace the root of the given window.
    Window(String),
    /// Present full screen on top of the given host view.
    PresentIn(String),
}

/// Per-run configuration passed to `FlowHandle::start`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunConfiguration {
    pub prefetch_mode: AssetsPrefetchMode,
    pub presentation_style: PresentationStyle,
    /// Host-provided loading view; `None` uses the built-in one.
    pub custom_loading_view: Option<String>,
}

impl RunConfiguration {
    pub fn with_prefetch_mode(mut self, mode: AssetsPrefetchMode) -> Self {
        self.prefetch_mode = mode;
        self
    }

    pub fn with_presentation_style(mut self, style: PresentationStyle) -> Self {
        self.presentation_style = style;
        self
    }

    pub fn with_custom_loading_view(mut self, view: impl Into<String>) -> Self {
        self.custom_loading_view = Some(view.into());
        self
    }
}
