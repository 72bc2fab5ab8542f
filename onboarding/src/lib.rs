//! # Onboarding flow engine
//!
//! Drives a user through a directed graph of onboarding screens. Screens are
//! rendered by the host; the engine decides which screen comes next, waits for
//! its assets, collects the values the user entered and reports analytics.
//!
//! ## Design Principles
//!
//! - **Explicit context**: `OnboardingService::spawn` returns a `FlowHandle`;
//!   there is no global instance. One service runs one flow at a time.
//! - **Single control task**: all state lives on one tokio task. Host calls,
//!   readiness signals and custom screen completions are messages.
//! - **Closed events**: analytics (`FlowEvent`) and diagnostics (`SystemEvent`)
//!   are tagged enums delivered through `EventSink`.
//! - **Opaque UI**: the engine only asks a `PresentationHandle` to set a root,
//!   push, present modally or dismiss.
//!
//! ## Main Modules
//!
//! - [`graph`]: `ScreenGraph`, `Screen`, `Action`, `ConditionedAction`, `Condition`, JSON loading and validation.
//! - [`resolver`]: edge resolution (conditioned, then unconditioned, then first edge).
//! - [`readiness`]: `ReadinessGate` applying an `AssetsPrefetchMode` to each transition.
//! - [`flow`]: `OnboardingService`, `FlowHandle` and the controller state machine.
//! - [`collaborators`]: host-implemented traits plus mock and recording implementations.
//! - [`events`]: `FlowEvent`, `SystemEvent` and the provided sinks.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use onboarding::{
//!     Action, Collaborators, ConditionedAction, OnboardingService, RecordingPresenter,
//!     RunConfiguration, Screen, ScreenGraph,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let graph = ScreenGraph::new("welcome").with_screen(
//!     Screen::standard("welcome", "Welcome")
//!         .with_action("continue", Action::new(vec![ConditionedAction::finish()])),
//! );
//! let flow = OnboardingService::spawn(Collaborators::default());
//! let outcome = flow
//!     .start(
//!         Arc::new(graph),
//!         RunConfiguration::default(),
//!         Arc::new(RecordingPresenter::new()),
//!         |result| println!("onboarding done: {:?}", result),
//!     )
//!     .await
//!     .unwrap();
//! # }
//! ```

pub mod collaborators;
pub mod config;
pub mod error;
pub mod events;
pub mod flow;
pub mod graph;
pub mod logging;
pub mod readiness;
pub mod resolver;
pub mod user_data;

pub use collaborators::mock::{
    MockPrefetchService, NoopVideoPreparation, PrefetchCall, PresentationCall, RecordingPresenter,
    RecordingVideoPreparation,
};
pub use collaborators::{
    AssetPrefetchService, ChildContainer, Collaborators, CustomScreenHandler, PresentationHandle,
    VideoPreparationService, ViewHandle,
};
pub use config::{AssetsPrefetchMode, PresentationStyle, RunConfiguration, DEFAULT_SCREEN_LOAD_TIMEOUT};
pub use error::{FlowError, PrefetchError};
pub use events::{
    ChannelEventSink, EmittedEvent, EventSink, FlowEvent, NoopEventSink, SystemEvent,
    TracingEventSink,
};
pub use flow::{
    CustomFlowBridge, FlowHandle, FlowPhase, FlowSnapshot, OnFinished, OnboardingService,
    StartOutcome,
};
pub use graph::{
    Action, Comparison, Condition, ConditionedAction, CustomScreenPayload, GraphIssue,
    GraphLoadError, Screen, ScreenGraph, ScreenId, ScreenType, TransitionKind,
};
pub use readiness::{GateDecision, ReadinessGate, ReadyTicket};
pub use resolver::{resolve, EdgeSelection, Resolution};
pub use user_data::{OnboardingData, UserDataStore};
