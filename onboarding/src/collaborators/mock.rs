//! Simulated and recording collaborators for tests, examples and the CLI.
//!
//! `MockPrefetchService` answers readiness after configurable latencies;
//! `RecordingPresenter` and `RecordingVideoPreparation` keep every call so
//! tests can assert what the flow asked the host to do.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use super::{AssetPrefetchService, PresentationHandle, VideoPreparationService, ViewHandle};
use crate::config::PresentationStyle;
use crate::error::PrefetchError;
use crate::graph::ScreenId;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// One call received by `MockPrefetchService`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrefetchCall {
    PrefetchAll,
    StartLazy,
    ScreenReady(ScreenId),
}

/// Prefetch service whose readiness arrives after fixed latencies.
///
/// Latency per screen falls back to `default_latency`; screens marked failing
/// resolve with `PrefetchError::Screen` after their latency.
#[derive(Debug, Default)]
pub struct MockPrefetchService {
    default_latency: Duration,
    all_done_latency: Duration,
    latencies: HashMap<ScreenId, Duration>,
    failing: HashSet<ScreenId>,
    calls: Mutex<Vec<PrefetchCall>>,
}

impl MockPrefetchService {
    /// Every screen is ready immediately.
    pub fn immediate() -> Self {
        Self::default()
    }

    /// Every screen (and the whole graph) is ready after `latency`.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            default_latency: latency,
            all_done_latency: latency,
            ..Self::default()
        }
    }

    /// Overrides the latency of one screen (builder style).
    pub fn screen_latency(mut self, screen_id: impl Into<ScreenId>, latency: Duration) -> Self {
        self.latencies.insert(screen_id.into(), latency);
        self
    }

    /// Overrides how long `prefetch_all_assets` takes (builder style).
    pub fn all_done_latency(mut self, latency: Duration) -> Self {
        self.all_done_latency = latency;
        self
    }

    /// Makes readiness for `screen_id` resolve with an error (builder style).
    pub fn failing_screen(mut self, screen_id: impl Into<ScreenId>) -> Self {
        self.failing.insert(screen_id.into());
        self
    }

    pub fn calls(&self) -> Vec<PrefetchCall> {
        lock(&self.calls).clone()
    }

    fn latency_for(&self, screen_id: &str) -> Duration {
        self.latencies
            .get(screen_id)
            .copied()
            .unwrap_or(self.default_latency)
    }
}

async fn wait(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

#[async_trait]
impl AssetPrefetchService for MockPrefetchService {
    async fn prefetch_all_assets(&self) -> Result<(), PrefetchError> {
        lock(&self.calls).push(PrefetchCall::PrefetchAll);
        wait(self.all_done_latency).await;
        Ok(())
    }

    fn start_lazy_prefetching(&self) {
        lock(&self.calls).push(PrefetchCall::StartLazy);
    }

    async fn screen_ready(&self, screen_id: &str) -> Result<(), PrefetchError> {
        lock(&self.calls).push(PrefetchCall::ScreenReady(screen_id.to_string()));
        wait(self.latency_for(screen_id)).await;
        if self.failing.contains(screen_id) {
            return Err(PrefetchError::Screen {
                screen_id: screen_id.to_string(),
                message: "simulated failure".into(),
            });
        }
        Ok(())
    }
}

/// One call received by `RecordingPresenter`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresentationCall {
    SetRoot(ViewHandle, PresentationStyle),
    Push(ViewHandle, bool),
    PresentModal(ViewHandle),
    DismissToRoot,
    Reactivate,
}

/// Presentation handle that records every call.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    calls: Mutex<Vec<PresentationCall>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<PresentationCall> {
        lock(&self.calls).clone()
    }

    /// Ids of the screens shown (standard and custom), in order.
    pub fn presented_screens(&self) -> Vec<ScreenId> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                PresentationCall::SetRoot(view, _)
                | PresentationCall::Push(view, _)
                | PresentationCall::PresentModal(view) => view.screen_id().cloned(),
                _ => None,
            })
            .collect()
    }
}

impl PresentationHandle for RecordingPresenter {
    fn set_root(&self, view: ViewHandle, style: &PresentationStyle) {
        lock(&self.calls).push(PresentationCall::SetRoot(view, style.clone()));
    }

    fn push(&self, view: ViewHandle, animated: bool) {
        lock(&self.calls).push(PresentationCall::Push(view, animated));
    }

    fn present_modal(&self, view: ViewHandle) {
        lock(&self.calls).push(PresentationCall::PresentModal(view));
    }

    fn dismiss_to_root(&self) {
        lock(&self.calls).push(PresentationCall::DismissToRoot);
    }

    fn reactivate(&self) {
        lock(&self.calls).push(PresentationCall::Reactivate);
    }
}

/// Video preparation that ignores hints.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopVideoPreparation;

impl VideoPreparationService for NoopVideoPreparation {
    fn prepare_for_next_screen(&self, _screen_id: Option<&str>) {}
}

/// Video preparation that records every hint.
#[derive(Debug, Default)]
pub struct RecordingVideoPreparation {
    hints: Mutex<Vec<Option<ScreenId>>>,
}

impl RecordingVideoPreparation {
    pub fn hints(&self) -> Vec<Option<ScreenId>> {
        lock(&self.hints).clone()
    }
}

impl VideoPreparationService for RecordingVideoPreparation {
    fn prepare_for_next_screen(&self, screen_id: Option<&str>) {
        lock(&self.hints).push(screen_id.map(str::to_string));
    }
}
