//! Flow phases and the observable snapshot of a controller.

use std::fmt;

use crate::graph::ScreenId;
use crate::user_data::OnboardingData;

/// Where the controller is in the state machine.
///
/// `Idle → Prefetching → Presenting(id) → AwaitingScreenCompletion(id) →
/// [Prefetching → Presenting(next) | CustomFlowActive(id) | Finished]`.
/// `Finished` ends a run; a new `start` may follow it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FlowPhase {
    #[default]
    Idle,
    /// Waiting on the readiness gate before the next presentation.
    Prefetching,
    Presenting(ScreenId),
    AwaitingScreenCompletion(ScreenId),
    CustomFlowActive(ScreenId),
    Finished,
}

impl FlowPhase {
    /// A run is active in every phase except `Idle` and `Finished`.
    pub fn is_running(&self) -> bool {
        !matches!(self, FlowPhase::Idle | FlowPhase::Finished)
    }
}

impl fmt::Display for FlowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowPhase::Idle => write!(f, "idle"),
            FlowPhase::Prefetching => write!(f, "prefetching"),
            FlowPhase::Presenting(id) => write!(f, "presenting({id})"),
            FlowPhase::AwaitingScreenCompletion(id) => write!(f, "awaiting({id})"),
            FlowPhase::CustomFlowActive(id) => write!(f, "custom({id})"),
            FlowPhase::Finished => write!(f, "finished"),
        }
    }
}

/// Read-only view of the controller's state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowSnapshot {
    pub phase: FlowPhase,
    pub current_screen_id: Option<ScreenId>,
    pub is_running: bool,
    /// The loading view is the flow's root and no screen has replaced it yet.
    pub pending_loading_overlay: bool,
    pub user_data: OnboardingData,
}

/// Result of a start request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// Another run is active; the request was ignored.
    AlreadyRunning,
    /// The graph does not contain its launch screen; nothing happened.
    MissingLaunchScreen,
}
