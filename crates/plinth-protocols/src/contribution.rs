//! Runtime contribution types.
//!
//! What an activated extension exposes: tools, services, state channels,
//! and UI slots, plus an optional teardown hook. A contribution is owned
//! exclusively by the registry entry that produced it and is replaced
//! wholesale on re-activation, never mutated in place.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::slot::SlotObservable;
use crate::types::Metadata;

/// Teardown hook attached to a contribution.
///
/// Both the registry and a factory-built extension's own deactivation may
/// reach this hook, so implementations must tolerate repeat invocation.
pub type DisposeFn = Arc<dyn Fn() + Send + Sync>;

/// A tool an extension contributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", rename = "inputSchema")]
    pub input_schema: Option<serde_json::Value>,
}

impl ToolDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            input_schema: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_input_schema(mut self, schema: serde_json::Value) -> Self {
        self.input_schema = Some(schema);
        self
    }
}

/// A long-lived service an extension contributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl ServiceDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
        }
    }
}

/// A named state channel an extension publishes on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl ChannelDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }
}

/// A named UI contribution point backed by its own observable state store.
#[derive(Clone)]
pub struct UiSlot {
    pub id: String,
    pub title: String,
    pub store: Arc<dyn SlotObservable>,
}

impl UiSlot {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        store: Arc<dyn SlotObservable>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            store,
        }
    }
}

impl fmt::Debug for UiSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiSlot")
            .field("id", &self.id)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Everything an activated extension exposes.
#[derive(Default, Clone)]
pub struct RuntimeContribution {
    pub tools: Vec<ToolDefinition>,
    pub services: Vec<ServiceDefinition>,
    pub state_channels: Vec<ChannelDefinition>,
    pub slots: Vec<UiSlot>,
    pub metadata: Option<Metadata>,
    pub dispose: Option<DisposeFn>,
}

impl RuntimeContribution {
    /// True when the contribution carries no tools, services, channels, or
    /// slots.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
            && self.services.is_empty()
            && self.state_channels.is_empty()
            && self.slots.is_empty()
    }
}

impl fmt::Debug for RuntimeContribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeContribution")
            .field("tools", &self.tools.len())
            .field("services", &self.services.len())
            .field("state_channels", &self.state_channels.len())
            .field("slots", &self.slots.len())
            .field("has_dispose", &self.dispose.is_some())
            .finish()
    }
}
