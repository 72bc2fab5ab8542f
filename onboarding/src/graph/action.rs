//! Actions and their conditioned edges.

use serde::{Deserialize, Serialize};

use super::condition::Condition;
use super::screen_graph::ScreenId;

/// How the next screen is shown: pushed onto the current stack or presented modally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    #[default]
    Default,
    Modal,
}

/// One candidate transition out of an action.
///
/// An empty `rule` makes the edge unconditional. A missing `next_screen_id`
/// (or one that is not in the graph) means the flow ends when this edge is taken.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionedAction {
    #[serde(default)]
    pub rule: Vec<Condition>,
    #[serde(default)]
    pub next_screen_id: Option<ScreenId>,
    #[serde(default)]
    pub transition_kind: TransitionKind,
}

impl ConditionedAction {
    /// Unconditional edge to `next_screen_id`.
    pub fn to(next_screen_id: impl Into<ScreenId>) -> Self {
        Self {
            rule: Vec::new(),
            next_screen_id: Some(next_screen_id.into()),
            transition_kind: TransitionKind::Default,
        }
    }

    /// Unconditional edge that ends the flow.
    pub fn finish() -> Self {
        Self::default()
    }

    /// Adds a condition to the rule (builder style). All conditions must hold.
    pub fn when(mut self, condition: Condition) -> Self {
        self.rule.push(condition);
        self
    }

    /// Marks the edge as a modal transition (builder style).
    pub fn modal(mut self) -> Self {
        self.transition_kind = TransitionKind::Modal;
        self
    }

    pub fn is_conditioned(&self) -> bool {
        !self.rule.is_empty()
    }
}

/// Result of a screen interaction: an ordered list of candidate edges.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(default)]
    pub edges: Vec<ConditionedAction>,
}

impl Action {
    pub fn new(edges: Vec<ConditionedAction>) -> Self {
        Self { edges }
    }

    /// Target of the first edge, used when resolution yields nothing.
    pub fn first_target(&self) -> Option<&ScreenId> {
        self.edges.first().and_then(|e| e.next_screen_id.as_ref())
    }
}
