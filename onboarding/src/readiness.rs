//! Readiness gate: decides whether a transition waits for prefetched assets.
//!
//! The gate never blocks. A wait spawns a task that races the prefetch
//! service's readiness future against the policy's timer and then runs the
//! `on_ready` callback once. Prefetch failures and timeouts both proceed.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::collaborators::AssetPrefetchService;
use crate::config::AssetsPrefetchMode;
use crate::graph::ScreenId;

/// Identifies one pending readiness wait.
///
/// The controller only honours the ticket it is currently waiting for, so a
/// readiness message that arrives late or twice has no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReadyTicket(pub(crate) u64);

/// How a transition is gated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Present now.
    Immediate,
    /// Wait until every asset of the graph is prefetched.
    AllAssets,
    /// Wait for one screen's assets, at most `timeout` when set.
    Screen { timeout: Option<Duration> },
}

impl GateDecision {
    pub fn is_immediate(&self) -> bool {
        matches!(self, GateDecision::Immediate)
    }
}

/// Applies an `AssetsPrefetchMode` to each transition of one run.
#[derive(Clone)]
pub struct ReadinessGate {
    mode: AssetsPrefetchMode,
    prefetch: Arc<dyn AssetPrefetchService>,
}

impl ReadinessGate {
    pub fn new(mode: AssetsPrefetchMode, prefetch: Arc<dyn AssetPrefetchService>) -> Self {
        Self { mode, prefetch }
    }

    /// Kicks off prefetching for a new run and gates the launch screen.
    ///
    /// `WaitForAllDone` defers all prefetching to the `AllAssets` wait; the lazy
    /// policies start background prefetching here.
    pub fn begin(&self, launch_screen_id: &str) -> GateDecision {
        match self.mode {
            AssetsPrefetchMode::WaitForAllDone => GateDecision::AllAssets,
            AssetsPrefetchMode::WaitForFirstDone | AssetsPrefetchMode::WaitForScreenToLoad { .. } => {
                self.prefetch.start_lazy_prefetching();
                self.decide(Some(launch_screen_id), true)
            }
        }
    }

    /// Gates a transition to `screen_id` after the run has begun.
    pub fn decide(&self, screen_id: Option<&str>, is_launch: bool) -> GateDecision {
        match (self.mode, screen_id) {
            (AssetsPrefetchMode::WaitForAllDone, _) => GateDecision::Immediate,
            (AssetsPrefetchMode::WaitForFirstDone, Some(_)) if is_launch => {
                GateDecision::Screen { timeout: None }
            }
            (AssetsPrefetchMode::WaitForFirstDone, _) => GateDecision::Immediate,
            (AssetsPrefetchMode::WaitForScreenToLoad { timeout }, Some(_)) => GateDecision::Screen {
                timeout: Some(timeout),
            },
            (AssetsPrefetchMode::WaitForScreenToLoad { .. }, None) => GateDecision::Immediate,
        }
    }

    /// Runs `on_ready` exactly once when `decision` is satisfied.
    ///
    /// Immediate decisions (and screen waits without a screen) call `on_ready`
    /// inline and return `None`; otherwise the wait runs on a spawned task.
    /// Must be called inside a tokio runtime.
    pub fn await_ready<F>(
        &self,
        decision: GateDecision,
        screen_id: Option<ScreenId>,
        on_ready: F,
    ) -> Option<JoinHandle<()>>
    where
        F: FnOnce() + Send + 'static,
    {
        let prefetch = self.prefetch.clone();
        match (decision, screen_id) {
            (GateDecision::AllAssets, _) => Some(tokio::spawn(async move {
                if let Err(e) = prefetch.prefetch_all_assets().await {
                    tracing::warn!(error = %e, "prefetching all assets failed, proceeding");
                }
                on_ready();
            })),
            (GateDecision::Screen { timeout }, Some(screen_id)) => Some(tokio::spawn(async move {
                wait_for_screen(prefetch.as_ref(), &screen_id, timeout).await;
                on_ready();
            })),
            _ => {
                on_ready();
                None
            }
        }
    }
}

async fn wait_for_screen(
    prefetch: &dyn AssetPrefetchService,
    screen_id: &str,
    timeout: Option<Duration>,
) {
    let ready = prefetch.screen_ready(screen_id);
    let outcome = match timeout {
        Some(limit) => tokio::select! {
            result = ready => result,
            _ = tokio::time::sleep(limit) => {
                tracing::debug!(screen_id, ?limit, "screen assets not ready in time, proceeding");
                return;
            }
        },
        None => ready.await,
    };
    if let Err(e) = outcome {
        tracing::warn!(screen_id, error = %e, "screen asset prefetch failed, proceeding");
    }
}
