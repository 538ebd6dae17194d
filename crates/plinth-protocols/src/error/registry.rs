//! Registry-related errors.

use thiserror::Error;

use crate::capability::Capability;
use crate::error::ExtensionError;

/// Errors returned by the extension registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Extension already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Extension not found: {0}")]
    NotFound(String),

    #[error("Extension {extension} requires missing capabilities: {}", format_capabilities(.missing))]
    MissingCapabilities {
        extension: String,
        missing: Vec<Capability>,
    },

    #[error("Extension {extension} failed to activate: {source}")]
    Activation {
        extension: String,
        #[source]
        source: ExtensionError,
    },
}

fn format_capabilities(capabilities: &[Capability]) -> String {
    capabilities
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
