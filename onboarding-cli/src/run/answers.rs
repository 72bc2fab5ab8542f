//! Scripted answers: what the simulated user enters on each screen.
//!
//! File format: `{ "<screen id>": { "value": <json>, "action": "<name>" } }`.
//! Screens without an entry complete with no value through their first
//! action in name order.

use std::collections::HashMap;
use std::path::Path;

use onboarding::{Action, Screen, ScreenId};
use serde::Deserialize;
use serde_json::Value;

use crate::config::Error;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Answer {
    #[serde(default)]
    pub value: Option<Value>,
    /// Name of the screen action to take.
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Answers(HashMap<ScreenId, Answer>);

impl Answers {
    pub fn from_json(text: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read answers file {}: {}", path.display(), e))?;
        Self::from_json(&text)
    }

    pub fn with_answer(mut self, screen_id: impl Into<ScreenId>, answer: Answer) -> Self {
        self.0.insert(screen_id.into(), answer);
        self
    }

    /// Scripted value for `screen_id`, if any.
    pub fn value_for(&self, screen_id: &str) -> Option<Value> {
        self.0.get(screen_id).and_then(|a| a.value.clone())
    }

    /// Value and action with which `screen` completes.
    ///
    /// An unknown action name falls back to the screen's first action.
    pub fn completion_for(&self, screen: &Screen) -> (Option<Value>, Option<Action>) {
        let default_action = || screen.default_action().map(|(_, action)| action.clone());
        let Some(answer) = self.0.get(&screen.id) else {
            return (None, default_action());
        };
        let action = match &answer.action {
            Some(name) => screen.action(name).cloned().or_else(|| {
                tracing::warn!(screen_id = %screen.id, action = %name, "unknown action in answers, using first action");
                default_action()
            }),
            None => default_action(),
        };
        (answer.value.clone(), action)
    }
}
