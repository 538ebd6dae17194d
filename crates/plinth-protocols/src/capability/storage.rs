//! Scoped key-value storage capability.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::HostError;

/// Key-value storage scoped by extension id.
///
/// Every operation is keyed by the owning extension's id so two
/// extensions can never collide on a key.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn read(
        &self,
        extension_id: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, HostError>;

    async fn write(
        &self,
        extension_id: &str,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), HostError>;

    async fn delete(&self, extension_id: &str, key: &str) -> Result<(), HostError>;

    /// List the keys stored for one extension.
    async fn list(&self, extension_id: &str) -> Result<Vec<String>, HostError>;

    /// Resolve a per-extension data directory, if the host provides one.
    fn data_path(&self, _extension_id: &str) -> Option<PathBuf> {
        None
    }
}
