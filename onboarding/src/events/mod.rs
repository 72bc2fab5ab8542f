//! Observability events emitted while a flow runs.
//!
//! Two closed channels: `FlowEvent` for user-facing analytics and
//! `SystemEvent` for engine diagnostics (which edge-selection branch was
//! taken). Sinks receive them through the `EventSink` trait.

mod sink;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::graph::{ConditionedAction, ScreenId};
use crate::user_data::OnboardingData;

pub use sink::{ChannelEventSink, EmittedEvent, EventSink, NoopEventSink, TracingEventSink};

/// User-facing analytics event.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FlowEvent {
    /// A screen completed; carries the entered value and the screen that comes next.
    ScreenDisappeared {
        screen_id: ScreenId,
        screen_name: String,
        next_screen_id: Option<ScreenId>,
        user_input_value: Value,
    },
    /// The user changed a value on a screen without leaving it.
    UserUpdatedValue {
        screen_id: ScreenId,
        screen_name: String,
        user_input_value: Value,
    },
    /// Control was handed to the host for a custom screen.
    CustomScreenRequested {
        screen_id: ScreenId,
        screen_name: String,
        labels: Map<String, Value>,
    },
    /// The host reported a custom screen as finished.
    CustomScreenDisappeared {
        screen_id: ScreenId,
        screen_name: String,
        user_input_value: Value,
    },
    /// A custom screen was reached but could not be handed to the host; the flow finishes.
    CustomScreenNotImplemented {
        screen_id: ScreenId,
        screen_name: String,
    },
    /// The run ended with the collected values.
    OnboardingFinished { user_data: OnboardingData },
}

impl FlowEvent {
    /// Stable snake_case name, matching the serialized `event` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            FlowEvent::ScreenDisappeared { .. } => "screen_disappeared",
            FlowEvent::UserUpdatedValue { .. } => "user_updated_value",
            FlowEvent::CustomScreenRequested { .. } => "custom_screen_requested",
            FlowEvent::CustomScreenDisappeared { .. } => "custom_screen_disappeared",
            FlowEvent::CustomScreenNotImplemented { .. } => "custom_screen_not_implemented",
            FlowEvent::OnboardingFinished { .. } => "onboarding_finished",
        }
    }
}

/// Engine diagnostic: which branch of edge resolution produced the next edge.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SystemEvent {
    /// A conditioned edge whose rule held.
    EdgeWithCondition { edge: ConditionedAction },
    /// No rule held; the first unconditioned edge was taken.
    EdgeWithoutCondition { edge: ConditionedAction },
    /// No rule held and no unconditioned edge exists; the first edge was taken anyway.
    EdgeWrongConditions { edge: ConditionedAction },
}

impl SystemEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            SystemEvent::EdgeWithCondition { .. } => "edge_with_condition",
            SystemEvent::EdgeWithoutCondition { .. } => "edge_without_condition",
            SystemEvent::EdgeWrongConditions { .. } => "edge_wrong_conditions",
        }
    }

    pub fn edge(&self) -> &ConditionedAction {
        match self {
            SystemEvent::EdgeWithCondition { edge }
            | SystemEvent::EdgeWithoutCondition { edge }
            | SystemEvent::EdgeWrongConditions { edge } => edge,
        }
    }
}
