//! External collaborators the flow talks to, as traits.
//!
//! Rendering, asset prefetching, video preparation and custom screens are
//! implemented by the host. The engine only sees these narrow interfaces;
//! `mock` provides recording and simulated implementations for tests and the CLI.

pub mod mock;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::PresentationStyle;
use crate::error::PrefetchError;
use crate::events::{EventSink, TracingEventSink};
use crate::flow::FlowHandle;
use crate::graph::{Screen, ScreenId, TransitionKind};

/// Container handed to a custom screen handler; the host renders into it.
///
/// `id` is unique per controller, so a host can tell repeated visits apart.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChildContainer {
    pub id: u64,
    pub screen_id: ScreenId,
}

/// Opaque description of what the presentation handle should show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewHandle {
    /// Loading view shown while the launch screen's assets are prefetched.
    Loading { custom_view: Option<String> },
    /// A standard SDK-rendered screen.
    Screen {
        screen_id: ScreenId,
        transition_kind: TransitionKind,
    },
    /// Container for a host-rendered custom screen.
    CustomContainer(ChildContainer),
}

impl ViewHandle {
    pub fn screen_id(&self) -> Option<&ScreenId> {
        match self {
            ViewHandle::Screen { screen_id, .. } => Some(screen_id),
            ViewHandle::CustomContainer(container) => Some(&container.screen_id),
            ViewHandle::Loading { .. } => None,
        }
    }
}

/// Host UI surface the flow presents into.
///
/// Calls are made on the control context and must not block. A view that
/// completes should report back through `FlowHandle`, never synchronously.
pub trait PresentationHandle: Send + Sync {
    /// Installs `view` as the flow's root, replacing whatever the flow showed before.
    fn set_root(&self, view: ViewHandle, style: &PresentationStyle);
    /// Pushes `view` on the current stack.
    fn push(&self, view: ViewHandle, animated: bool);
    /// Presents `view` modally over the current stack.
    fn present_modal(&self, view: ViewHandle);
    /// Removes everything the flow presented and restores the host UI.
    fn dismiss_to_root(&self);
    /// Brings the flow's container back to the foreground (app returned from background).
    fn reactivate(&self) {}
}

/// Asset prefetching. Owns per-screen readiness; the gate only awaits it.
#[async_trait]
pub trait AssetPrefetchService: Send + Sync {
    /// Prefetches every asset of the graph; resolves when all are done.
    async fn prefetch_all_assets(&self) -> Result<(), PrefetchError>;
    /// Starts background prefetching without waiting.
    fn start_lazy_prefetching(&self);
    /// Resolves when the assets of `screen_id` are ready.
    async fn screen_ready(&self, screen_id: &str) -> Result<(), PrefetchError>;
}

/// Video preparation hint; fire-and-forget.
pub trait VideoPreparationService: Send + Sync {
    fn prepare_for_next_screen(&self, screen_id: Option<&str>);
}

/// Host implementation of custom screens.
///
/// Called when the flow reaches a custom screen. The host renders into
/// `container` and must eventually call `FlowHandle::custom_flow_finished`.
pub trait CustomScreenHandler: Send + Sync {
    fn start(&self, screen: &Screen, container: ChildContainer, flow: FlowHandle);
}

impl<F> CustomScreenHandler for F
where
    F: Fn(&Screen, ChildContainer, FlowHandle) + Send + Sync,
{
    fn start(&self, screen: &Screen, container: ChildContainer, flow: FlowHandle) {
        self(screen, container, flow)
    }
}

/// Collaborators shared by every run of one `OnboardingService`.
#[derive(Clone)]
pub struct Collaborators {
    pub prefetch: Arc<dyn AssetPrefetchService>,
    pub video: Arc<dyn VideoPreparationService>,
    pub events: Arc<dyn EventSink>,
    /// `None` means custom screens end the flow.
    pub custom_screen_handler: Option<Arc<dyn CustomScreenHandler>>,
}

impl Default for Collaborators {
    /// Immediate prefetch, no video preparation, events to `tracing`, no custom handler.
    fn default() -> Self {
        Self {
            prefetch: Arc::new(mock::MockPrefetchService::immediate()),
            video: Arc::new(mock::NoopVideoPreparation),
            events: Arc::new(TracingEventSink),
            custom_screen_handler: None,
        }
    }
}

impl Collaborators {
    pub fn with_prefetch(self, prefetch: Arc<dyn AssetPrefetchService>) -> Self {
        Self { prefetch, ..self }
    }

    pub fn with_video(self, video: Arc<dyn VideoPreparationService>) -> Self {
        Self { video, ..self }
    }

    pub fn with_events(self, events: Arc<dyn EventSink>) -> Self {
        Self { events, ..self }
    }

    pub fn with_custom_screen_handler(self, handler: Arc<dyn CustomScreenHandler>) -> Self {
        Self {
            custom_screen_handler: Some(handler),
            ..self
        }
    }
}
