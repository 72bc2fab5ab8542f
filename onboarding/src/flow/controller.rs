//! Flow controller: the state machine driven by the control task.
//!
//! Owns the active run (graph, collected data, presentation handle, terminal
//! callback) and turns host messages and readiness signals into presentation
//! calls. Every method runs on the control task, so no locking is needed.

use std::ops::ControlFlow;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::mpsc::WeakUnboundedSender;
use tokio::task::JoinHandle;

use super::command::{FlowCommand, OnFinished};
use super::custom::CustomFlowBridge;
use super::phase::{FlowPhase, FlowSnapshot, StartOutcome};
use super::FlowHandle;
use crate::collaborators::{Collaborators, PresentationHandle, ViewHandle};
use crate::config::RunConfiguration;
use crate::error::FlowError;
use crate::events::FlowEvent;
use crate::graph::{Action, Screen, ScreenGraph, ScreenId, TransitionKind};
use crate::logging::{
    log_flow_finished, log_flow_start, log_flow_start_rejected, log_host_call_panicked,
    log_ignored_without_run, log_readiness_stale, log_readiness_wait, log_screen_presented,
};
use crate::readiness::{GateDecision, ReadinessGate, ReadyTicket};
use crate::resolver::resolve;
use crate::user_data::UserDataStore;

/// Runs host code on the control task. A panic is logged and swallowed so the
/// task and the flow state survive it.
pub(super) fn call_host(what: &str, f: impl FnOnce()) {
    if catch_unwind(AssertUnwindSafe(f)).is_err() {
        log_host_call_panicked(what);
    }
}

/// A presentation waiting on the readiness gate.
struct PendingPresentation {
    ticket: ReadyTicket,
    screen_id: Option<ScreenId>,
    transition_kind: TransitionKind,
    wait: Option<JoinHandle<()>>,
}

impl PendingPresentation {
    fn cancel(self) {
        if let Some(wait) = self.wait {
            wait.abort();
        }
    }
}

/// State scoped to one run; dropped as a whole when the run ends.
struct FlowRun {
    graph: Arc<ScreenGraph>,
    config: RunConfiguration,
    gate: ReadinessGate,
    presentation: Arc<dyn PresentationHandle>,
    user_data: UserDataStore,
    on_finished: Option<OnFinished>,
    current_screen_id: Option<ScreenId>,
    /// A root view (loading or screen) has been installed.
    root_installed: bool,
    /// The installed root is the loading view.
    loading_root: bool,
    pending: Option<PendingPresentation>,
}

impl FlowRun {
    /// Installs the loading view as root unless something is already on screen.
    fn show_loading(&mut self) {
        if self.root_installed {
            return;
        }
        let view = ViewHandle::Loading {
            custom_view: self.config.custom_loading_view.clone(),
        };
        call_host("set_root", || {
            self.presentation.set_root(view, &self.config.presentation_style)
        });
        self.root_installed = true;
        self.loading_root = true;
    }

    fn is_launch(&self, screen_id: Option<&str>) -> bool {
        screen_id.is_some_and(|id| self.graph.is_launch_screen(id))
    }
}

pub(crate) struct FlowController {
    collaborators: Collaborators,
    commands: WeakUnboundedSender<FlowCommand>,
    custom: CustomFlowBridge,
    phase: FlowPhase,
    run: Option<FlowRun>,
    next_ticket: u64,
}

impl FlowController {
    pub(crate) fn new(collaborators: Collaborators, commands: WeakUnboundedSender<FlowCommand>) -> Self {
        let custom = CustomFlowBridge::new(collaborators.custom_screen_handler.clone());
        Self {
            collaborators,
            commands,
            custom,
            phase: FlowPhase::Idle,
            run: None,
            next_ticket: 0,
        }
    }

    /// Applies one message. `Break` stops the control task.
    pub(crate) fn handle(&mut self, command: FlowCommand) -> ControlFlow<()> {
        match command {
            FlowCommand::Start {
                graph,
                config,
                presentation,
                on_finished,
                reply,
            } => {
                let outcome = self.start(graph, config, presentation, on_finished);
                let _ = reply.send(outcome);
            }
            FlowCommand::ScreenCompleted {
                screen,
                value,
                action,
            } => self.screen_completed(&screen, value, action.as_ref()),
            FlowCommand::ValueUpdated { screen, value } => self.value_updated(&screen, value),
            FlowCommand::CustomFlowFinished { screen, value } => self.custom_flow_finished(&screen, value),
            FlowCommand::ScreenReady { ticket } => self.on_screen_ready(ticket),
            FlowCommand::EnterForeground => self.enter_foreground(),
            FlowCommand::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
            FlowCommand::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    pub(crate) fn start(
        &mut self,
        graph: Arc<ScreenGraph>,
        config: RunConfiguration,
        presentation: Arc<dyn PresentationHandle>,
        on_finished: OnFinished,
    ) -> StartOutcome {
        let launch = graph.launch_screen_id.clone();
        if self.run.is_some() {
            log_flow_start_rejected(&launch, "already running");
            return StartOutcome::AlreadyRunning;
        }
        if graph.launch_screen().is_none() {
            log_flow_start_rejected(&launch, "launch screen not in graph");
            return StartOutcome::MissingLaunchScreen;
        }

        log_flow_start(&launch, &config.prefetch_mode, graph.screens.len());
        let gate = ReadinessGate::new(config.prefetch_mode, self.collaborators.prefetch.clone());
        let decision = gate.begin(&launch);
        self.run = Some(FlowRun {
            graph,
            config,
            gate,
            presentation,
            user_data: UserDataStore::new(),
            on_finished: Some(on_finished),
            current_screen_id: None,
            root_installed: false,
            loading_root: false,
            pending: None,
        });
        self.phase = FlowPhase::Prefetching;
        self.gate_transition(decision, Some(launch), TransitionKind::Default);
        StartOutcome::Started
    }

    /// Records the value, resolves the next edge and moves on through the gate.
    ///
    /// When the chosen edge has no target the first edge's target is used, so a
    /// targetless edge only ends the flow if the first edge has none either.
    pub(crate) fn screen_completed(&mut self, screen: &Screen, value: Option<Value>, action: Option<&Action>) {
        let Some(run) = self.run.as_mut() else {
            log_ignored_without_run("screen_completed");
            return;
        };
        if run.current_screen_id.as_deref() != Some(screen.id.as_str()) {
            tracing::warn!(
                screen_id = %screen.id,
                current = ?run.current_screen_id,
                "completion reported for a screen that is not current"
            );
        }

        let value = value.filter(|v| !v.is_null());
        if let Some(v) = &value {
            run.user_data.record(screen.id.clone(), v.clone());
        }

        let events = self.collaborators.events.clone();
        let resolution = resolve(action, Some(run.graph.as_ref()), &run.user_data, events.as_ref());
        let next = resolution
            .and_then(|r| r.edge.next_screen_id.clone())
            .or_else(|| action.and_then(Action::first_target).cloned());
        let transition_kind = resolution
            .map(|r| r.edge.transition_kind)
            .unwrap_or_default();

        self.collaborators.video.prepare_for_next_screen(next.as_deref());
        events.emit(&FlowEvent::ScreenDisappeared {
            screen_id: screen.id.clone(),
            screen_name: screen.name.clone(),
            next_screen_id: next.clone(),
            user_input_value: value.unwrap_or(Value::Null),
        });

        let decision = run.gate.decide(next.as_deref(), run.is_launch(next.as_deref()));
        self.gate_transition(decision, next, transition_kind);
    }

    /// Emits a live edit. No state change.
    pub(crate) fn value_updated(&mut self, screen: &Screen, value: Value) {
        self.collaborators.events.emit(&FlowEvent::UserUpdatedValue {
            screen_id: screen.id.clone(),
            screen_name: screen.name.clone(),
            user_input_value: value,
        });
    }

    /// Resumes traversal after the host finished a custom screen.
    pub(crate) fn custom_flow_finished(&mut self, screen: &Screen, value: Option<Value>) {
        if self.run.is_none() {
            log_ignored_without_run("custom_flow_finished");
            return;
        }
        let callback = screen.custom_payload().map(|p| p.callback_action.clone());
        let reported = match (&callback, &value) {
            (Some(_), Some(v)) => v.clone(),
            _ => Value::Object(Map::new()),
        };
        self.collaborators.events.emit(&FlowEvent::CustomScreenDisappeared {
            screen_id: screen.id.clone(),
            screen_name: screen.name.clone(),
            user_input_value: reported,
        });
        match callback {
            Some(action) => self.screen_completed(screen, value, action.as_ref()),
            None => tracing::warn!(screen_id = %screen.id, "custom screen has no payload, not resuming"),
        }
    }

    pub(crate) fn on_screen_ready(&mut self, ticket: ReadyTicket) {
        let Some(run) = self.run.as_mut() else {
            log_ignored_without_run("screen_ready");
            return;
        };
        let pending = match run.pending.take() {
            Some(pending) if pending.ticket == ticket => pending,
            other => {
                run.pending = other;
                log_readiness_stale(ticket.0);
                return;
            }
        };
        self.present(pending.screen_id, pending.transition_kind);
    }

    pub(crate) fn enter_foreground(&mut self) {
        match &self.run {
            Some(run) => {
                call_host("reactivate", || run.presentation.reactivate());
            }
            None => log_ignored_without_run("enter_foreground"),
        }
    }

    /// Ends the run. Idempotent: only the first call after a start does anything.
    pub(crate) fn finish(&mut self) {
        let Some(mut run) = self.run.take() else {
            return;
        };
        self.phase = FlowPhase::Finished;
        if let Some(pending) = run.pending.take() {
            pending.cancel();
        }

        let data = run.user_data.take();
        log_flow_finished(data.len());
        self.collaborators.events.emit(&FlowEvent::OnboardingFinished {
            user_data: data.clone(),
        });
        if let Some(on_finished) = run.on_finished.take() {
            call_host("on_finished", || on_finished(Ok(data)));
        }
        if run.root_installed {
            call_host("dismiss_to_root", || run.presentation.dismiss_to_root());
        }
    }

    /// Ends an active run because the control task is stopping.
    pub(crate) fn abandon(&mut self) {
        let Some(mut run) = self.run.take() else {
            return;
        };
        tracing::warn!(current = ?run.current_screen_id, "control task stopped mid-run");
        self.phase = FlowPhase::Finished;
        if let Some(pending) = run.pending.take() {
            pending.cancel();
        }
        if let Some(on_finished) = run.on_finished.take() {
            call_host("on_finished", || on_finished(Err(FlowError::ControllerClosed)));
        }
        if run.root_installed {
            call_host("dismiss_to_root", || run.presentation.dismiss_to_root());
        }
    }

    pub(crate) fn snapshot(&self) -> FlowSnapshot {
        let run = self.run.as_ref();
        FlowSnapshot {
            phase: self.phase.clone(),
            current_screen_id: run.and_then(|r| r.current_screen_id.clone()),
            is_running: run.is_some(),
            pending_loading_overlay: run.is_some_and(|r| r.loading_root),
            user_data: run.map(|r| r.user_data.snapshot()).unwrap_or_default(),
        }
    }

    /// Presents `next` now or once the gate releases it.
    fn gate_transition(&mut self, decision: GateDecision, next: Option<ScreenId>, transition_kind: TransitionKind) {
        if decision.is_immediate() {
            self.present(next, transition_kind);
            return;
        }
        let Some(run) = self.run.as_mut() else {
            return;
        };
        if run.is_launch(next.as_deref()) {
            run.show_loading();
        }

        self.next_ticket += 1;
        let ticket = ReadyTicket(self.next_ticket);
        let timeout = match decision {
            GateDecision::Screen { timeout } => timeout,
            _ => None,
        };
        log_readiness_wait(next.as_deref(), timeout);

        let commands = self.commands.clone();
        let wait = run.gate.await_ready(decision, next.clone(), move || {
            if let Some(tx) = commands.upgrade() {
                let _ = tx.send(FlowCommand::ScreenReady { ticket });
            }
        });
        let replaced = run.pending.replace(PendingPresentation {
            ticket,
            screen_id: next,
            transition_kind,
            wait,
        });
        if let Some(stale) = replaced {
            stale.cancel();
        }
        self.phase = FlowPhase::Prefetching;
    }

    /// Shows `next`, hands it to the custom bridge, or finishes.
    fn present(&mut self, next: Option<ScreenId>, transition_kind: TransitionKind) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        let Some(screen) = next.as_deref().and_then(|id| run.graph.screen(id)).cloned() else {
            self.finish();
            return;
        };
        run.current_screen_id = Some(screen.id.clone());
        self.phase = FlowPhase::Presenting(screen.id.clone());

        if screen.is_custom() {
            let flow = self.commands.upgrade().map(FlowHandle::from_sender);
            let presentation = run.root_installed.then(|| run.presentation.as_ref());
            let started = self.custom.try_start(
                &screen,
                presentation,
                &mut run.user_data,
                self.collaborators.events.as_ref(),
                flow,
            );
            if started {
                run.loading_root = false;
                self.phase = FlowPhase::CustomFlowActive(screen.id);
            } else {
                self.finish();
            }
            return;
        }

        let view = ViewHandle::Screen {
            screen_id: screen.id.clone(),
            transition_kind,
        };
        let presentation = run.presentation.as_ref();
        let how = if run.graph.is_launch_screen(&screen.id) {
            call_host("set_root", || presentation.set_root(view, &run.config.presentation_style));
            run.root_installed = true;
            "set_root"
        } else if transition_kind == TransitionKind::Modal {
            call_host("present_modal", || presentation.present_modal(view));
            "present_modal"
        } else {
            call_host("push", || presentation.push(view, true));
            "push"
        };
        run.loading_root = false;
        log_screen_presented(&screen.id, how);
        self.phase = FlowPhase::AwaitingScreenCompletion(screen.id);
    }
}
