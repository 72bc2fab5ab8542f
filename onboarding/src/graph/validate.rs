//! Diagnostic graph checks.
//!
//! `ScreenGraph::validate` lists authoring problems without rejecting the
//! graph; the flow still runs and degrades to early finish where a problem is hit.

use std::fmt;

use super::action::Action;
use super::screen_graph::{ScreenGraph, ScreenId};

/// One authoring problem found by `ScreenGraph::validate`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphIssue {
    /// `launch_screen_id` is not a key of `screens`; the flow will not start.
    MissingLaunchScreen(ScreenId),
    /// A screen is stored under a key that differs from its own id.
    ScreenIdMismatch { key: ScreenId, id: ScreenId },
    /// An edge points at a screen that is not in the graph; taking it ends the flow.
    DanglingEdge { from: ScreenId, action: String, target: ScreenId },
    /// A rule condition reads a screen that is not in the graph; it never holds.
    UnknownConditionScreen { from: ScreenId, action: String, screen_id: ScreenId },
    /// A custom screen without payload; reaching it ends the flow.
    CustomScreenWithoutPayload(ScreenId),
    /// Every edge of the action is conditioned, so resolution may fall back to the first edge.
    NoUnconditionedEdge { from: ScreenId, action: String },
}

impl fmt::Display for GraphIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphIssue::MissingLaunchScreen(id) => write!(f, "launch screen {id} is not in the graph"),
            GraphIssue::ScreenIdMismatch { key, id } => {
                write!(f, "screen stored under key {key} has id {id}")
            }
            GraphIssue::DanglingEdge { from, action, target } => {
                write!(f, "{from}/{action}: edge targets unknown screen {target}")
            }
            GraphIssue::UnknownConditionScreen { from, action, screen_id } => {
                write!(f, "{from}/{action}: condition reads unknown screen {screen_id}")
            }
            GraphIssue::CustomScreenWithoutPayload(id) => {
                write!(f, "custom screen {id} has no custom_screen payload")
            }
            GraphIssue::NoUnconditionedEdge { from, action } => {
                write!(f, "{from}/{action}: all edges are conditioned, fallback picks the first")
            }
        }
    }
}

impl ScreenGraph {
    /// Lists authoring problems. Output is sorted by screen id for stable reporting.
    pub fn validate(&self) -> Vec<GraphIssue> {
        let mut issues = Vec::new();
        if self.launch_screen().is_none() {
            issues.push(GraphIssue::MissingLaunchScreen(self.launch_screen_id.clone()));
        }

        let mut keys: Vec<_> = self.screens.keys().collect();
        keys.sort();
        for key in keys {
            let screen = &self.screens[key];
            if &screen.id != key {
                issues.push(GraphIssue::ScreenIdMismatch {
                    key: key.clone(),
                    id: screen.id.clone(),
                });
            }
            if screen.is_custom() {
                match screen.custom_payload() {
                    Some(payload) => {
                        if let Some(action) = &payload.callback_action {
                            self.check_action(key, "callback", action, &mut issues);
                        }
                    }
                    None => issues.push(GraphIssue::CustomScreenWithoutPayload(key.clone())),
                }
            }
            for (name, action) in &screen.actions {
                self.check_action(key, name, action, &mut issues);
            }
        }
        issues
    }

    fn check_action(&self, from: &str, name: &str, action: &Action, issues: &mut Vec<GraphIssue>) {
        for edge in &action.edges {
            if let Some(target) = &edge.next_screen_id {
                if self.screen(target).is_none() {
                    issues.push(GraphIssue::DanglingEdge {
                        from: from.to_string(),
                        action: name.to_string(),
                        target: target.clone(),
                    });
                }
            }
            for condition in &edge.rule {
                if self.screen(&condition.screen_id).is_none() {
                    issues.push(GraphIssue::UnknownConditionScreen {
                        from: from.to_string(),
                        action: name.to_string(),
                        screen_id: condition.screen_id.clone(),
                    });
                }
            }
        }
        if !action.edges.is_empty() && action.edges.iter().all(|e| e.is_conditioned()) {
            issues.push(GraphIssue::NoUnconditionedEdge {
                from: from.to_string(),
                action: name.to_string(),
            });
        }
    }
}
