//! Extension contract: manifest, lifecycle trait, activation context.

mod context;
mod manifest;
mod traits;

pub use context::ExtensionContext;
pub use manifest::ExtensionManifest;
pub use traits::Extension;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a registered extension.
///
/// `Failed` entries keep their manifest discoverable for diagnostics but
/// are excluded from every aggregate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionStatus {
    Unregistered,
    Activating,
    Active,
    Deactivating,
    Failed,
}
