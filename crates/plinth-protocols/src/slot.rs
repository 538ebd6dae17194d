//! UI slot state types and observation contracts.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::subscriber::SubscriberId;

/// Badge shown next to a slot's entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BadgeValue {
    Count(i64),
    Text(String),
}

/// An entry in a list panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelItem {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl PanelItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }
}

/// A titled group of items in a list panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelSection {
    pub title: String,
    pub items: Vec<PanelItem>,
}

/// An action the panel offers (button or menu entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelAction {
    pub id: String,
    pub label: String,
}

/// Body of a list panel: flat items or grouped sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListBody {
    Items(Vec<PanelItem>),
    Sections(Vec<PanelSection>),
}

impl Default for ListBody {
    fn default() -> Self {
        ListBody::Items(Vec::new())
    }
}

/// Configuration for the list panel kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListPanel {
    #[serde(flatten)]
    pub body: ListBody,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<PanelAction>,
}

/// Panel configuration, tagged by kind. Currently only the list kind
/// exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PanelConfig {
    List(ListPanel),
}

impl Default for PanelConfig {
    fn default() -> Self {
        PanelConfig::List(ListPanel::default())
    }
}

/// Snapshot of one slot's UI state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<BadgeValue>,
    #[serde(default)]
    pub visible: bool,
    pub panel: PanelConfig,
}

/// Listener invoked after a slot store publishes a new snapshot. The
/// listener reads the fresh state through [`SlotObservable::state`].
pub type SlotListener = Arc<dyn Fn() + Send + Sync>;

/// Observable slot state contract implemented by the stores in
/// `plinth-core`.
pub trait SlotObservable: Send + Sync {
    /// Current snapshot.
    fn state(&self) -> Arc<SlotState>;

    fn subscribe(&self, listener: SlotListener) -> SubscriberId;

    fn unsubscribe(&self, id: SubscriberId);
}

/// External source a derived slot store projects from.
pub trait SlotSource: Send + Sync {
    /// Compute the slot state from the source's current data.
    fn compute(&self) -> SlotState;

    /// Subscribe to change notifications from the source.
    fn subscribe(&self, listener: SlotListener) -> SubscriberId;

    fn unsubscribe(&self, id: SubscriberId);
}
