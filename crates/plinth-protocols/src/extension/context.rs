//! Extension context passed through activation and deactivation.

use serde::de::DeserializeOwned;

/// Context handed to an extension for its whole registered lifetime.
#[derive(Debug, Clone)]
pub struct ExtensionContext {
    /// Id of the extension this context belongs to.
    pub extension_id: String,

    /// Host-provided configuration for this extension.
    pub config: serde_json::Value,
}

impl ExtensionContext {
    pub fn new(extension_id: impl Into<String>, config: serde_json::Value) -> Self {
        Self {
            extension_id: extension_id.into(),
            config,
        }
    }

    /// Get a configuration value by key.
    pub fn get_config<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.config
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}
