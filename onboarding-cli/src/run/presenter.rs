//! Presentation handle that prints what would be shown and answers each
//! screen from the script.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use onboarding::{FlowHandle, PresentationHandle, PresentationStyle, ScreenGraph, ViewHandle};

use super::answers::Answers;

pub struct ScriptedPresenter {
    graph: Arc<ScreenGraph>,
    answers: Arc<Answers>,
    flow: FlowHandle,
    steps: AtomicUsize,
    max_steps: usize,
}

impl ScriptedPresenter {
    pub fn new(graph: Arc<ScreenGraph>, answers: Arc<Answers>, flow: FlowHandle, max_steps: usize) -> Self {
        Self {
            graph,
            answers,
            flow,
            steps: AtomicUsize::new(0),
            max_steps,
        }
    }

    /// Reports a shown standard screen as completed; the flow picks it up as a message.
    fn answer(&self, view: &ViewHandle) {
        let ViewHandle::Screen { screen_id, .. } = view else {
            return;
        };
        let Some(screen) = self.graph.screen(screen_id) else {
            return;
        };
        if self.steps.fetch_add(1, Ordering::SeqCst) >= self.max_steps {
            tracing::error!(max_steps = self.max_steps, "step limit reached, stopping the flow");
            let _ = self.flow.shutdown();
            return;
        }
        let (value, action) = self.answers.completion_for(screen);
        if let Err(e) = self.flow.screen_completed(screen.clone(), value, action) {
            tracing::warn!(screen_id = %screen.id, error = %e, "cannot report screen completion");
        }
    }
}

fn describe(view: &ViewHandle) -> String {
    match view {
        ViewHandle::Loading { custom_view: None } => "loading".to_string(),
        ViewHandle::Loading {
            custom_view: Some(id),
        } => format!("loading ({})", id),
        ViewHandle::Screen { screen_id, .. } => format!("screen {}", screen_id),
        ViewHandle::CustomContainer(container) => {
            format!("custom container #{} for {}", container.id, container.screen_id)
        }
    }
}

impl PresentationHandle for ScriptedPresenter {
    fn set_root(&self, view: ViewHandle, style: &PresentationStyle) {
        println!("[present] set_root {} ({:?})", describe(&view), style);
        self.answer(&view);
    }

    fn push(&self, view: ViewHandle, _animated: bool) {
        println!("[present] push {}", describe(&view));
        self.answer(&view);
    }

    fn present_modal(&self, view: ViewHandle) {
        println!("[present] present_modal {}", describe(&view));
        self.answer(&view);
    }

    fn dismiss_to_root(&self) {
        println!("[present] dismiss_to_root");
    }

    fn reactivate(&self) {
        println!("[present] reactivate");
    }
}
