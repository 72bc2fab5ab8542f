//! Event sink printing analytics events as JSON lines on stdout.

use onboarding::{EventSink, FlowEvent, SystemEvent};

#[derive(Clone, Copy, Debug, Default)]
pub struct PrintingEventSink;

impl EventSink for PrintingEventSink {
    fn emit(&self, event: &FlowEvent) {
        match serde_json::to_string(event) {
            Ok(line) => println!("[event] {}", line),
            Err(e) => tracing::warn!(kind = event.kind(), error = %e, "cannot serialize event"),
        }
    }

    fn emit_system(&self, event: &SystemEvent) {
        tracing::debug!(kind = event.kind(), next_screen_id = ?event.edge().next_screen_id, "edge selected");
    }
}
