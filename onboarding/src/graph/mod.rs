//! Screen graph: screens, their exit actions and the conditioned edges between them.
//!
//! The graph is declarative data, loaded from JSON (`ScreenGraph::from_json` /
//! `from_path`) and held immutably (`Arc<ScreenGraph>`) for the whole run.
//! Validation is diagnostic only: the flow never refuses a graph, it degrades
//! to early finish on dangling references.

mod action;
mod condition;
mod load_error;
mod screen_graph;
mod validate;

pub use action::{Action, ConditionedAction, TransitionKind};
pub use condition::{Comparison, Condition};
pub use load_error::GraphLoadError;
pub use screen_graph::{CustomScreenPayload, Screen, ScreenGraph, ScreenId, ScreenType};
pub use validate::GraphIssue;
