//! Edge resolution: pick the edge an action follows given the collected data.
//!
//! Priority, first match wins:
//! 1. first edge whose non-empty rule holds (`EdgeSelection::Conditioned`);
//! 2. first edge with an empty rule (`EdgeSelection::Unconditioned`);
//! 3. first edge of the list (`EdgeSelection::Fallback`).
//!
//! The only side effect is one system event per resolution naming the branch taken.

use crate::events::{EventSink, SystemEvent};
use crate::graph::{Action, ConditionedAction, ScreenGraph};
use crate::user_data::UserDataStore;

/// Which resolution branch produced the edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeSelection {
    Conditioned,
    Unconditioned,
    /// Every edge is conditioned and none held. May hide a graph authoring error.
    Fallback,
}

/// Selected edge plus the branch that selected it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution<'a> {
    pub edge: &'a ConditionedAction,
    pub selection: EdgeSelection,
}

/// Resolves `action` against `user_data`.
///
/// Returns `None` when there is no action, no graph or no edges; otherwise
/// always returns an edge.
pub fn resolve<'a>(
    action: Option<&'a Action>,
    graph: Option<&ScreenGraph>,
    user_data: &UserDataStore,
    sink: &dyn EventSink,
) -> Option<Resolution<'a>> {
    let (action, graph) = (action?, graph?);
    let resolution = select(action, graph, user_data)?;

    let edge = resolution.edge.clone();
    let event = match resolution.selection {
        EdgeSelection::Conditioned => SystemEvent::EdgeWithCondition { edge },
        EdgeSelection::Unconditioned => SystemEvent::EdgeWithoutCondition { edge },
        EdgeSelection::Fallback => {
            tracing::warn!(
                next_screen_id = ?resolution.edge.next_screen_id,
                "no edge condition matched, falling back to first edge"
            );
            SystemEvent::EdgeWrongConditions { edge }
        }
    };
    sink.emit_system(&event);
    Some(resolution)
}

fn select<'a>(
    action: &'a Action,
    graph: &ScreenGraph,
    user_data: &UserDataStore,
) -> Option<Resolution<'a>> {
    let conditioned = action
        .edges
        .iter()
        .filter(|e| e.is_conditioned())
        .find(|e| e.rule.iter().all(|c| c.holds(graph, user_data)));
    if let Some(edge) = conditioned {
        return Some(Resolution {
            edge,
            selection: EdgeSelection::Conditioned,
        });
    }

    if let Some(edge) = action.edges.iter().find(|e| !e.is_conditioned()) {
        return Some(Resolution {
            edge,
            selection: EdgeSelection::Unconditioned,
        });
    }

    action.edges.first().map(|edge| Resolution {
        edge,
        selection: EdgeSelection::Fallback,
    })
}
