//! Custom screen handler that completes custom screens with scripted values.

use std::sync::Arc;

use onboarding::{ChildContainer, CustomScreenHandler, FlowHandle, Screen};

use super::answers::Answers;

pub struct ScriptedCustomHandler {
    answers: Arc<Answers>,
}

impl ScriptedCustomHandler {
    pub fn new(answers: Arc<Answers>) -> Self {
        Self { answers }
    }
}

impl CustomScreenHandler for ScriptedCustomHandler {
    fn start(&self, screen: &Screen, container: ChildContainer, flow: FlowHandle) {
        println!("[custom] {} ({}) in container #{}", screen.id, screen.name, container.id);
        let value = self.answers.value_for(&screen.id);
        if let Err(e) = flow.custom_flow_finished(screen.clone(), value) {
            tracing::warn!(screen_id = %screen.id, error = %e, "cannot report custom screen");
        }
    }
}
