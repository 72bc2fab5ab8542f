//! Flow control: the single-task state machine that walks the screen graph.
//!
//! `OnboardingService::spawn` starts a control task owning a `FlowController`.
//! Hosts, readiness waits and custom screen handlers all talk to it through
//! `FlowHandle` messages, so flow state is only ever touched on that task.

mod command;
mod controller;
mod custom;
mod phase;
mod service;

pub use command::OnFinished;
pub use custom::CustomFlowBridge;
pub use phase::{FlowPhase, FlowSnapshot, StartOutcome};
pub use service::{FlowHandle, OnboardingService};
