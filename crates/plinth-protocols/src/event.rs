//! Registry lifecycle events.

use serde::{Deserialize, Serialize};

/// Kind of a lifecycle notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryEventKind {
    Registered,
    Activated,
    Deactivated,
    Unregistered,
    Error,
}

/// A lifecycle notification broadcast synchronously to subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryEvent {
    #[serde(rename = "type")]
    pub kind: RegistryEventKind,
    #[serde(rename = "extensionId")]
    pub extension_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl RegistryEvent {
    pub fn new(kind: RegistryEventKind, extension_id: impl Into<String>) -> Self {
        Self {
            kind,
            extension_id: extension_id.into(),
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }
}
