//! Values collected during a run, keyed by the screen that produced them.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::graph::ScreenId;

/// Snapshot of collected values handed to the terminal callback.
///
/// Ordered by screen id so printed and serialized results are stable.
pub type OnboardingData = BTreeMap<ScreenId, Value>;

/// Mutable map from screen id to the last value entered on that screen.
///
/// Grows during a run (a later value for the same screen replaces the earlier
/// one) and is cleared when the run finishes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserDataStore {
    values: HashMap<ScreenId, Value>,
}

impl UserDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` for `screen_id`, replacing any earlier value.
    pub fn record(&mut self, screen_id: impl Into<ScreenId>, value: Value) {
        self.values.insert(screen_id.into(), value);
    }

    pub fn get(&self, screen_id: &str) -> Option<&Value> {
        self.values.get(screen_id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy of the current values.
    pub fn snapshot(&self) -> OnboardingData {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Moves all values out, leaving the store empty.
    pub fn take(&mut self) -> OnboardingData {
        std::mem::take(&mut self.values).into_iter().collect()
    }
}
