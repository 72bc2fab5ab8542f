//! Messages processed by the control task.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::oneshot;

use super::phase::{FlowSnapshot, StartOutcome};
use crate::collaborators::PresentationHandle;
use crate::config::RunConfiguration;
use crate::error::FlowError;
use crate::graph::{Action, Screen, ScreenGraph};
use crate::readiness::ReadyTicket;
use crate::user_data::OnboardingData;

/// Terminal callback of a run. Called at most once.
pub type OnFinished = Box<dyn FnOnce(Result<OnboardingData, FlowError>) + Send>;

/// Everything that can change controller state arrives as one of these.
pub(crate) enum FlowCommand {
    Start {
        graph: Arc<ScreenGraph>,
        config: RunConfiguration,
        presentation: Arc<dyn PresentationHandle>,
        on_finished: OnFinished,
        reply: oneshot::Sender<StartOutcome>,
    },
    ScreenCompleted {
        screen: Screen,
        value: Option<Value>,
        action: Option<Action>,
    },
    ValueUpdated {
        screen: Screen,
        value: Value,
    },
    CustomFlowFinished {
        screen: Screen,
        value: Option<Value>,
    },
    ScreenReady {
        ticket: ReadyTicket,
    },
    EnterForeground,
    Snapshot {
        reply: oneshot::Sender<FlowSnapshot>,
    },
    Shutdown,
}

impl FlowCommand {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            FlowCommand::Start { .. } => "start",
            FlowCommand::ScreenCompleted { .. } => "screen_completed",
            FlowCommand::ValueUpdated { .. } => "value_updated",
            FlowCommand::CustomFlowFinished { .. } => "custom_flow_finished",
            FlowCommand::ScreenReady { .. } => "screen_ready",
            FlowCommand::EnterForeground => "enter_foreground",
            FlowCommand::Snapshot { .. } => "snapshot",
            FlowCommand::Shutdown => "shutdown",
        }
    }
}

impl fmt::Debug for FlowCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowCommand::ScreenCompleted { screen, .. }
            | FlowCommand::ValueUpdated { screen, .. }
            | FlowCommand::CustomFlowFinished { screen, .. } => {
                write!(f, "{}({})", self.name(), screen.id)
            }
            FlowCommand::ScreenReady { ticket } => write!(f, "{}({})", self.name(), ticket.0),
            _ => f.write_str(self.name()),
        }
    }
}
