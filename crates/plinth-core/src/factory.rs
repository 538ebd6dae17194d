//! Declarative extension factory.
//!
//! Builds an [`Extension`] from a configuration object instead of a
//! hand-written trait impl. Validation is eager: an extension offering
//! nothing is a configuration error at build time, not a runtime
//! surprise.

use std::collections::BTreeSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use tracing::warn;

use plinth_protocols::error::ExtensionError;
use plinth_protocols::extension::{Extension, ExtensionContext, ExtensionManifest};
use plinth_protocols::types::Metadata;
use plinth_protocols::{
    Capability, ChannelDefinition, DisposeFn, Host, RuntimeContribution, ServiceDefinition,
    ToolDefinition, UiSlot,
};

/// Contribution parts produced by a runtime factory at activation time.
#[derive(Default)]
pub struct RuntimeParts {
    pub tools: Vec<ToolDefinition>,
    pub services: Vec<ServiceDefinition>,
    pub state_channels: Vec<ChannelDefinition>,
    pub slots: Vec<UiSlot>,
    pub metadata: Option<Metadata>,
    pub dispose: Option<DisposeFn>,
}

/// Factory producing the dynamic half of a contribution.
pub type RuntimeFactoryFn = Box<
    dyn Fn(
            Arc<dyn Host>,
            ExtensionContext,
        ) -> BoxFuture<'static, Result<RuntimeParts, ExtensionError>>
        + Send
        + Sync,
>;

/// Hook invoked before the runtime factory during activation.
pub type InitHookFn = Box<
    dyn Fn(Arc<dyn Host>, ExtensionContext) -> BoxFuture<'static, Result<(), ExtensionError>>
        + Send
        + Sync,
>;

/// Hook invoked after dispose during deactivation.
pub type DestroyHookFn =
    Box<dyn Fn(ExtensionContext) -> BoxFuture<'static, Result<(), ExtensionError>> + Send + Sync>;

/// Declarative configuration an extension is assembled from.
#[derive(Default)]
pub struct ExtensionDefinition {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub required_capabilities: BTreeSet<Capability>,

    /// Statically declared contributions, merged after anything the
    /// runtime factory produces.
    pub tools: Vec<ToolDefinition>,
    pub services: Vec<ServiceDefinition>,
    pub state_channels: Vec<ChannelDefinition>,
    pub slots: Vec<UiSlot>,

    pub create_runtime: Option<RuntimeFactoryFn>,
    pub on_initialize: Option<InitHookFn>,
    pub on_destroy: Option<DestroyHookFn>,
}

impl ExtensionDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    pub fn with_required_capabilities(
        mut self,
        capabilities: impl IntoIterator<Item = Capability>,
    ) -> Self {
        self.required_capabilities = capabilities.into_iter().collect();
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_slots(mut self, slots: Vec<UiSlot>) -> Self {
        self.slots = slots;
        self
    }

    pub fn with_create_runtime(mut self, factory: RuntimeFactoryFn) -> Self {
        self.create_runtime = Some(factory);
        self
    }

    fn declares_static_contribution(&self) -> bool {
        !self.tools.is_empty()
            || !self.services.is_empty()
            || !self.state_channels.is_empty()
            || !self.slots.is_empty()
    }
}

/// Build an extension from a declarative definition.
///
/// Fails immediately on an empty id/name/version or on a definition that
/// declares neither static contributions nor a runtime factory.
pub fn build_extension(
    definition: ExtensionDefinition,
) -> Result<DeclaredExtension, ExtensionError> {
    if definition.id.trim().is_empty() {
        return Err(ExtensionError::InvalidDefinition(
            "id must be a non-empty string".to_string(),
        ));
    }
    if definition.name.trim().is_empty() {
        return Err(ExtensionError::InvalidDefinition(
            "name must be a non-empty string".to_string(),
        ));
    }
    if definition.version.trim().is_empty() {
        return Err(ExtensionError::InvalidDefinition(
            "version must be a non-empty string".to_string(),
        ));
    }
    if !definition.declares_static_contribution() && definition.create_runtime.is_none() {
        return Err(ExtensionError::InvalidDefinition(format!(
            "extension {} declares no tools, services, state channels, slots, or runtime factory",
            definition.id
        )));
    }

    let mut manifest = ExtensionManifest::new(
        definition.id.clone(),
        definition.name.clone(),
        definition.version.clone(),
    )
    .with_required_capabilities(definition.required_capabilities.iter().copied());
    manifest.description = definition.description.clone();

    Ok(DeclaredExtension {
        manifest,
        definition,
        dispose: Mutex::new(None),
    })
}

/// An extension assembled from an [`ExtensionDefinition`].
pub struct DeclaredExtension {
    manifest: ExtensionManifest,
    definition: ExtensionDefinition,
    /// Dispose handle retained from the last activation, taken on
    /// deactivate so the factory-side teardown runs at most once.
    dispose: Mutex<Option<DisposeFn>>,
}

impl std::fmt::Debug for DeclaredExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeclaredExtension")
            .field("manifest", &self.manifest)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Extension for DeclaredExtension {
    fn manifest(&self) -> &ExtensionManifest {
        &self.manifest
    }

    async fn activate(
        &self,
        host: Arc<dyn Host>,
        ctx: &ExtensionContext,
    ) -> Result<RuntimeContribution, ExtensionError> {
        if let Some(hook) = &self.definition.on_initialize {
            hook(host.clone(), ctx.clone()).await?;
        }

        let parts = match &self.definition.create_runtime {
            Some(factory) => factory(host, ctx.clone()).await?,
            None => RuntimeParts::default(),
        };

        // Factory-produced contributions come first, then the static
        // declarations.
        let mut contribution = RuntimeContribution {
            tools: parts.tools,
            services: parts.services,
            state_channels: parts.state_channels,
            slots: parts.slots,
            metadata: parts.metadata,
            dispose: parts.dispose.clone(),
        };
        contribution.tools.extend(self.definition.tools.iter().cloned());
        contribution
            .services
            .extend(self.definition.services.iter().cloned());
        contribution
            .state_channels
            .extend(self.definition.state_channels.iter().cloned());
        contribution.slots.extend(self.definition.slots.iter().cloned());

        // An extension that declares capabilities but activates into
        // nothing is a fatal misconfiguration, not a silent no-op.
        if contribution.is_empty() {
            return Err(ExtensionError::EmptyContribution(self.manifest.id.clone()));
        }

        *self.dispose.lock() = parts.dispose;
        Ok(contribution)
    }

    async fn deactivate(&self, ctx: &ExtensionContext) -> Result<(), ExtensionError> {
        if let Some(dispose) = self.dispose.lock().take() {
            if catch_unwind(AssertUnwindSafe(|| dispose())).is_err() {
                warn!(extension = %self.manifest.id, "dispose hook panicked");
            }
        }

        if let Some(hook) = &self.definition.on_destroy {
            hook(ctx.clone()).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "factory_tests.rs"]
mod tests;
