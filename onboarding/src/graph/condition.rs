//! Rule conditions: a comparison against a value collected on an earlier screen.
//!
//! A condition never fails loudly. A screen that is not in the graph, a screen
//! with no stored value, a path that does not resolve, or operands of
//! incompatible types all make the condition not hold.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::screen_graph::{ScreenGraph, ScreenId};
use crate::user_data::UserDataStore;

/// Comparison applied between the stored value (left) and the condition's `value` (right).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
    /// Array holds the value, string holds the substring, or object has the key.
    Contains,
    NotContains,
    /// The stored value (at `path`) is present and not null; `value` is ignored.
    Exists,
}

/// Predicate over one screen's collected value.
///
/// `path` is a dot-separated walk into the stored JSON (`"profile.age"`,
/// `"answers.0"`); without a path the whole stored value is compared.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub screen_id: ScreenId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub comparison: Comparison,
    #[serde(default)]
    pub value: Value,
}

impl Condition {
    pub fn new(
        screen_id: impl Into<ScreenId>,
        path: Option<&str>,
        comparison: Comparison,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            screen_id: screen_id.into(),
            path: path.map(str::to_string),
            comparison,
            value: value.into(),
        }
    }

    /// `screen_id.path == value`.
    pub fn equals(screen_id: impl Into<ScreenId>, path: &str, value: impl Into<Value>) -> Self {
        Self::new(screen_id, Some(path), Comparison::Equals, value)
    }

    /// Evaluates the condition against the collected data.
    pub fn holds(&self, graph: &ScreenGraph, user_data: &UserDataStore) -> bool {
        if graph.screen(&self.screen_id).is_none() {
            return false;
        }
        let Some(stored) = user_data.get(&self.screen_id) else {
            return false;
        };
        let target = match self.path.as_deref() {
            None | Some("") => Some(stored),
            Some(path) => lookup(stored, path),
        };
        match target {
            Some(left) => self.comparison.apply(left, &self.value),
            None => false,
        }
    }
}

impl Comparison {
    /// Applies the comparison; incompatible operand types yield `false`.
    pub fn apply(self, left: &Value, right: &Value) -> bool {
        match self {
            Comparison::Equals => loosely_equal(left, right),
            Comparison::NotEquals => !loosely_equal(left, right),
            Comparison::GreaterThan => order(left, right) == Some(Ordering::Greater),
            Comparison::GreaterOrEqual => {
                matches!(order(left, right), Some(Ordering::Greater | Ordering::Equal))
            }
            Comparison::LessThan => order(left, right) == Some(Ordering::Less),
            Comparison::LessOrEqual => {
                matches!(order(left, right), Some(Ordering::Less | Ordering::Equal))
            }
            Comparison::Contains => contains(left, right).unwrap_or(false),
            Comparison::NotContains => contains(left, right).map(|c| !c).unwrap_or(false),
            Comparison::Exists => !left.is_null(),
        }
    }
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Numbers compare by value (`1` equals `1.0`); everything else structurally.
fn loosely_equal(left: &Value, right: &Value) -> bool {
    match (left.as_f64(), right.as_f64()) {
        (Some(l), Some(r)) => l == r,
        _ => left == right,
    }
}

fn order(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => l.as_f64()?.partial_cmp(&r.as_f64()?),
        (Value::String(l), Value::String(r)) => Some(l.cmp(r)),
        _ => None,
    }
}

/// `None` when the left operand is not a container.
fn contains(left: &Value, right: &Value) -> Option<bool> {
    match left {
        Value::Array(items) => Some(items.iter().any(|item| loosely_equal(item, right))),
        Value::String(s) => Some(right.as_str().is_some_and(|needle| s.contains(needle))),
        Value::Object(map) => Some(right.as_str().is_some_and(|key| map.contains_key(key))),
        _ => None,
    }
}
