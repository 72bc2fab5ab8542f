//! Event sinks: where flow and system events go.

use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use super::{FlowEvent, SystemEvent};

/// Receiver of observability events.
///
/// Called on the control context; implementations must not block. The system
/// channel is optional: the default implementation drops diagnostics.
pub trait EventSink: Send + Sync {
    /// User-facing analytics event.
    fn emit(&self, event: &FlowEvent);

    /// Engine diagnostic event.
    fn emit_system(&self, _event: &SystemEvent) {}
}

/// Sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: &FlowEvent) {}
}

/// Sink that writes events to `tracing`: analytics at info, diagnostics at debug.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: &FlowEvent) {
        tracing::info!(kind = event.kind(), ?event, "flow event");
    }

    fn emit_system(&self, event: &SystemEvent) {
        tracing::debug!(
            kind = event.kind(),
            next_screen_id = ?event.edge().next_screen_id,
            "system event"
        );
    }
}

/// Either channel's event, as delivered by `ChannelEventSink`.
#[derive(Clone, Debug, PartialEq)]
pub enum EmittedEvent {
    User(FlowEvent),
    System(SystemEvent),
}

/// Sink that forwards both channels into an unbounded mpsc channel.
///
/// Use `channel()` for the raw receiver (tests drain it with `try_recv`) or
/// `stream()` for a `Stream` of events.
#[derive(Clone, Debug)]
pub struct ChannelEventSink {
    tx: mpsc::UnboundedSender<EmittedEvent>,
}

impl ChannelEventSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<EmittedEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn stream() -> (Self, UnboundedReceiverStream<EmittedEvent>) {
        let (sink, rx) = Self::channel();
        (sink, UnboundedReceiverStream::new(rx))
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: &FlowEvent) {
        let _ = self.tx.send(EmittedEvent::User(event.clone()));
    }

    fn emit_system(&self, event: &SystemEvent) {
        let _ = self.tx.send(EmittedEvent::System(event.clone()));
    }
}
