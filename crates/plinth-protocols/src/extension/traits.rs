//! Extension trait definition.

use std::sync::Arc;

use async_trait::async_trait;

use super::{ExtensionContext, ExtensionManifest};
use crate::capability::Host;
use crate::contribution::RuntimeContribution;
use crate::error::ExtensionError;

/// Core trait for all extensions.
///
/// An extension is a pluggable unit identified by its manifest. Activation
/// against a [`Host`] yields a [`RuntimeContribution`]; deactivation is
/// best-effort teardown. Extensions are either hand-implemented or built
/// declaratively through the factory in `plinth-core`.
#[async_trait]
pub trait Extension: Send + Sync + 'static {
    /// Returns the extension manifest.
    fn manifest(&self) -> &ExtensionManifest;

    /// Activate the extension against the given host.
    ///
    /// The registry guarantees the manifest's required capabilities are a
    /// subset of the host's set before this is invoked.
    async fn activate(
        &self,
        host: Arc<dyn Host>,
        ctx: &ExtensionContext,
    ) -> Result<RuntimeContribution, ExtensionError>;

    /// Deactivate the extension.
    async fn deactivate(&self, _ctx: &ExtensionContext) -> Result<(), ExtensionError> {
        Ok(())
    }
}
