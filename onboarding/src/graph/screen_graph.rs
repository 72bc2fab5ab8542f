//! Screens and the graph that holds them.
//!
//! `ScreenGraph` maps screen ids to `Screen`s and names the launch screen.
//! Standard screens expose named exit `actions`; custom screens carry a
//! `CustomScreenPayload` whose callback action is resolved when the host
//! hands control back.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::action::Action;
use super::load_error::GraphLoadError;

/// Screen identifier as it appears in the graph JSON.
pub type ScreenId = String;

/// Who renders a screen: the SDK (`Standard`) or the host application (`CustomScreen`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenType {
    #[default]
    Standard,
    CustomScreen,
}

/// Payload of a host-rendered screen.
///
/// `values` are the labels the graph author attached to the screen; they are
/// recorded as the screen's initial user data when the host takes over.
/// `callback_action` is resolved once the host reports completion; `None`
/// ends the flow.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomScreenPayload {
    #[serde(default)]
    pub callback_action: Option<Action>,
    #[serde(default)]
    pub values: Map<String, Value>,
}

/// One node of the screen graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub id: ScreenId,
    pub name: String,
    #[serde(default)]
    pub screen_type: ScreenType,
    /// Present for `ScreenType::CustomScreen`; ignored otherwise.
    #[serde(default, rename = "custom_screen", skip_serializing_if = "Option::is_none")]
    pub custom_payload: Option<CustomScreenPayload>,
    /// Named exits of a standard screen (e.g. `"primary"`, `"skip"`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub actions: BTreeMap<String, Action>,
}

impl Screen {
    /// Creates a standard screen with no actions.
    pub fn standard(id: impl Into<ScreenId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            screen_type: ScreenType::Standard,
            custom_payload: None,
            actions: BTreeMap::new(),
        }
    }

    /// Creates a host-rendered screen with the given payload.
    pub fn custom(
        id: impl Into<ScreenId>,
        name: impl Into<String>,
        payload: CustomScreenPayload,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            screen_type: ScreenType::CustomScreen,
            custom_payload: Some(payload),
            actions: BTreeMap::new(),
        }
    }

    /// Adds a named exit action (builder style).
    pub fn with_action(mut self, name: impl Into<String>, action: Action) -> Self {
        self.actions.insert(name.into(), action);
        self
    }

    pub fn is_custom(&self) -> bool {
        self.screen_type == ScreenType::CustomScreen
    }

    /// Payload of a custom screen; `None` for standard screens even if one was supplied.
    pub fn custom_payload(&self) -> Option<&CustomScreenPayload> {
        if self.is_custom() {
            self.custom_payload.as_ref()
        } else {
            None
        }
    }

    /// Looks up a named exit action.
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    /// First action in name order; used when a driver has no explicit choice.
    pub fn default_action(&self) -> Option<(&String, &Action)> {
        self.actions.iter().next()
    }
}

/// Directed graph of onboarding screens.
///
/// Immutable once a flow starts; the controller holds it behind an `Arc`.
/// Edges live inside each screen's actions, so a graph is just the screen map
/// plus the launch screen id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenGraph {
    pub launch_screen_id: ScreenId,
    #[serde(default)]
    pub screens: HashMap<ScreenId, Screen>,
}

impl ScreenGraph {
    /// Creates an empty graph that will start at `launch_screen_id`.
    pub fn new(launch_screen_id: impl Into<ScreenId>) -> Self {
        Self {
            launch_screen_id: launch_screen_id.into(),
            screens: HashMap::new(),
        }
    }

    /// Adds a screen keyed by its id; replaces an existing screen with the same id.
    pub fn with_screen(mut self, screen: Screen) -> Self {
        self.screens.insert(screen.id.clone(), screen);
        self
    }

    /// Parses a graph from JSON text.
    pub fn from_json(text: &str) -> Result<Self, GraphLoadError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a graph file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GraphLoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GraphLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn screen(&self, id: &str) -> Option<&Screen> {
        self.screens.get(id)
    }

    /// The launch screen, or `None` when the graph does not contain it.
    pub fn launch_screen(&self) -> Option<&Screen> {
        self.screens.get(&self.launch_screen_id)
    }

    pub fn is_launch_screen(&self, id: &str) -> bool {
        self.launch_screen_id == id
    }
}
