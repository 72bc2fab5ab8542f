//! Shared helpers for flow integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use onboarding::{
    Action, Collaborators, ConditionedAction, FlowError, FlowHandle, FlowSnapshot, OnboardingData,
    OnboardingService, RecordingPresenter, RunConfiguration, Screen, ScreenGraph, StartOutcome,
};
use tokio::sync::oneshot;

pub type Done = oneshot::Receiver<Result<OnboardingData, FlowError>>;

/// A started run: the handle, what was presented, and the terminal result.
pub struct Run {
    pub flow: FlowHandle,
    pub presenter: Arc<RecordingPresenter>,
    pub graph: Arc<ScreenGraph>,
    pub outcome: StartOutcome,
    pub done: Done,
}

impl Run {
    pub fn screen(&self, id: &str) -> Screen {
        self.graph.screen(id).cloned().expect("screen in graph")
    }

    /// Completes `id` with `value` through its action named `action`.
    pub fn complete(&self, id: &str, value: Option<serde_json::Value>, action: &str) {
        let screen = self.screen(id);
        let action = screen.action(action).cloned();
        self.flow
            .screen_completed(screen, value, action)
            .expect("controller alive");
    }
}

pub async fn start(collaborators: Collaborators, graph: ScreenGraph, config: RunConfiguration) -> Run {
    let flow = OnboardingService::spawn(collaborators);
    start_on(flow, graph, config).await
}

pub async fn start_on(flow: FlowHandle, graph: ScreenGraph, config: RunConfiguration) -> Run {
    let presenter = Arc::new(RecordingPresenter::new());
    let graph = Arc::new(graph);
    let (tx, done) = oneshot::channel();
    let outcome = flow
        .start(graph.clone(), config, presenter.clone(), move |result| {
            let _ = tx.send(result);
        })
        .await
        .expect("controller alive");
    Run {
        flow,
        presenter,
        graph,
        outcome,
        done,
    }
}

/// Polls snapshots until `pred` holds. Works with a paused clock.
pub async fn wait_until(flow: &FlowHandle, pred: impl Fn(&FlowSnapshot) -> bool) -> FlowSnapshot {
    for _ in 0..10_000 {
        let snapshot = flow.snapshot().await.expect("controller alive");
        if pred(&snapshot) {
            return snapshot;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    panic!("flow never reached the expected state");
}

pub fn awaiting(id: &str) -> impl Fn(&FlowSnapshot) -> bool + '_ {
    move |s| s.phase == onboarding::FlowPhase::AwaitingScreenCompletion(id.to_string())
}

pub fn next(target: &str) -> Action {
    Action::new(vec![ConditionedAction::to(target)])
}

pub fn finish() -> Action {
    Action::new(vec![ConditionedAction::finish()])
}

/// welcome → name → done(end).
pub fn linear_graph() -> ScreenGraph {
    ScreenGraph::new("welcome")
        .with_screen(Screen::standard("welcome", "Welcome").with_action("continue", next("name")))
        .with_screen(Screen::standard("name", "Your name").with_action("continue", next("done")))
        .with_screen(Screen::standard("done", "All set").with_action("close", finish()))
}
