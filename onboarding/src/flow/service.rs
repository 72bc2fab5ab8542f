//! Control task and the handle hosts use to talk to it.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::command::FlowCommand;
use super::controller::FlowController;
use super::phase::{FlowSnapshot, StartOutcome};
use crate::collaborators::{Collaborators, PresentationHandle};
use crate::config::RunConfiguration;
use crate::error::FlowError;
use crate::graph::{Action, Screen, ScreenGraph};
use crate::user_data::OnboardingData;

/// Entry point: spawns the control task for one logical flow.
///
/// Each service runs at most one flow at a time; runs may follow each other.
pub struct OnboardingService;

impl OnboardingService {
    /// Spawns the control task on the current tokio runtime.
    pub fn spawn(collaborators: Collaborators) -> FlowHandle {
        Self::spawn_with_join(collaborators).0
    }

    /// Like `spawn`, also returning the control task's join handle.
    pub fn spawn_with_join(collaborators: Collaborators) -> (FlowHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = FlowController::new(collaborators, tx.downgrade());
        let task = tokio::spawn(run_control_loop(controller, rx));
        (FlowHandle::from_sender(tx), task)
    }
}

/// Drains commands until shutdown or until every `FlowHandle` is gone.
async fn run_control_loop(
    mut controller: FlowController,
    mut commands: mpsc::UnboundedReceiver<FlowCommand>,
) {
    tracing::debug!("onboarding control task started");
    while let Some(command) = commands.recv().await {
        tracing::trace!(?command, "processing flow command");
        if controller.handle(command).is_break() {
            break;
        }
    }
    controller.abandon();
    tracing::debug!("onboarding control task stopped");
}

/// Cloneable handle to the control task.
///
/// Every call posts a message; state changes happen on the control task in
/// the order messages were sent. Calls fail with `FlowError::ControllerClosed`
/// once the task has stopped.
#[derive(Clone, Debug)]
pub struct FlowHandle {
    tx: mpsc::UnboundedSender<FlowCommand>,
}

impl FlowHandle {
    pub(crate) fn from_sender(tx: mpsc::UnboundedSender<FlowCommand>) -> Self {
        Self { tx }
    }

    fn send(&self, command: FlowCommand) -> Result<(), FlowError> {
        self.tx.send(command).map_err(|_| FlowError::ControllerClosed)
    }

    /// Starts a run of `graph`.
    ///
    /// `on_finished` is called once when the run ends: with `Ok` and the
    /// collected data on normal completion, or with
    /// `Err(FlowError::ControllerClosed)` if the service stops mid-run. It is
    /// dropped without being called unless the outcome is `Started`.
    pub async fn start<F>(
        &self,
        graph: Arc<ScreenGraph>,
        config: RunConfiguration,
        presentation: Arc<dyn PresentationHandle>,
        on_finished: F,
    ) -> Result<StartOutcome, FlowError>
    where
        F: FnOnce(Result<OnboardingData, FlowError>) + Send + 'static,
    {
        let (reply, outcome) = oneshot::channel();
        self.send(FlowCommand::Start {
            graph,
            config,
            presentation,
            on_finished: Box::new(on_finished),
            reply,
        })?;
        outcome.await.map_err(|_| FlowError::ControllerClosed)
    }

    /// Reports that `screen` completed with `value` through `action`.
    pub fn screen_completed(
        &self,
        screen: Screen,
        value: Option<Value>,
        action: Option<Action>,
    ) -> Result<(), FlowError> {
        self.send(FlowCommand::ScreenCompleted {
            screen,
            value,
            action,
        })
    }

    /// Reports a live edit on `screen` that does not complete it.
    pub fn value_updated(&self, screen: Screen, value: Value) -> Result<(), FlowError> {
        self.send(FlowCommand::ValueUpdated { screen, value })
    }

    /// Called by a `CustomScreenHandler` when its custom screen is done.
    pub fn custom_flow_finished(&self, screen: Screen, value: Option<Value>) -> Result<(), FlowError> {
        self.send(FlowCommand::CustomFlowFinished { screen, value })
    }

    /// Tells the flow the app came back to the foreground.
    pub fn app_will_enter_foreground(&self) -> Result<(), FlowError> {
        self.send(FlowCommand::EnterForeground)
    }

    /// Current controller state, after every message sent before this call.
    pub async fn snapshot(&self) -> Result<FlowSnapshot, FlowError> {
        let (reply, snapshot) = oneshot::channel();
        self.send(FlowCommand::Snapshot { reply })?;
        snapshot.await.map_err(|_| FlowError::ControllerClosed)
    }

    /// Stops the control task after the messages already queued.
    pub fn shutdown(&self) -> Result<(), FlowError> {
        self.send(FlowCommand::Shutdown)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
