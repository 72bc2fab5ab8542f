//! Hand-off of custom screens to the host.

use std::sync::Arc;

use serde_json::Value;

use super::controller::call_host;
use super::FlowHandle;
use crate::collaborators::{ChildContainer, CustomScreenHandler, PresentationHandle, ViewHandle};
use crate::events::{EventSink, FlowEvent};
use crate::graph::Screen;
use crate::logging::log_screen_presented;
use crate::user_data::UserDataStore;

/// Starts host-implemented custom screens inside the flow's container.
pub struct CustomFlowBridge {
    handler: Option<Arc<dyn CustomScreenHandler>>,
    next_container_id: u64,
}

impl CustomFlowBridge {
    pub fn new(handler: Option<Arc<dyn CustomScreenHandler>>) -> Self {
        Self {
            handler,
            next_container_id: 0,
        }
    }

    /// Hands `screen` to the host handler.
    ///
    /// Needs a handler, an installed root (`presentation`), the screen's custom
    /// payload and a live `flow` handle for the host to report back on. When
    /// any is missing, emits `CustomScreenNotImplemented` and returns `false`.
    pub fn try_start(
        &mut self,
        screen: &Screen,
        presentation: Option<&dyn PresentationHandle>,
        user_data: &mut UserDataStore,
        events: &dyn EventSink,
        flow: Option<FlowHandle>,
    ) -> bool {
        let (Some(handler), Some(presentation), Some(payload), Some(flow)) = (
            self.handler.as_ref(),
            presentation,
            screen.custom_payload(),
            flow,
        ) else {
            tracing::warn!(screen_id = %screen.id, "custom screen cannot be started, finishing");
            events.emit(&FlowEvent::CustomScreenNotImplemented {
                screen_id: screen.id.clone(),
                screen_name: screen.name.clone(),
            });
            return false;
        };

        events.emit(&FlowEvent::CustomScreenRequested {
            screen_id: screen.id.clone(),
            screen_name: screen.name.clone(),
            labels: payload.values.clone(),
        });
        user_data.record(screen.id.clone(), Value::Object(payload.values.clone()));

        self.next_container_id += 1;
        let container = ChildContainer {
            id: self.next_container_id,
            screen_id: screen.id.clone(),
        };
        let handed = container.clone();
        call_host("custom_screen_handler", || handler.start(screen, handed, flow));
        call_host("push", || presentation.push(ViewHandle::CustomContainer(container), true));
        log_screen_presented(&screen.id, "custom");
        true
    }
}
