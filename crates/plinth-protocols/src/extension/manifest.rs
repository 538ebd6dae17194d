//! Extension manifest types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::capability::Capability;

/// Extension manifest containing metadata.
///
/// Immutable once the extension is registered; the id is the primary key
/// across the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionManifest {
    pub id: String,
    pub name: String,
    /// Semver string, e.g. `"1.2.0"`.
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "requiredCapabilities")]
    pub required_capabilities: BTreeSet<Capability>,
}

impl ExtensionManifest {
    /// Create a new extension manifest.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            description: None,
            required_capabilities: BTreeSet::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_required_capabilities(
        mut self,
        capabilities: impl IntoIterator<Item = Capability>,
    ) -> Self {
        self.required_capabilities = capabilities.into_iter().collect();
        self
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
