//! Extension registry: the lifecycle orchestrator.
//!
//! Owns the id -> entry map and drives each entry through
//! `Unregistered -> Activating -> Active -> Deactivating -> Unregistered`,
//! with `Activating -> Failed` on activation error. Failed entries keep
//! their manifest listed for diagnostics but never appear in the
//! aggregate views.
//!
//! Register/unregister for one id are serialized in-component through a
//! per-id async mutex, so racing callers cannot interleave activation and
//! deactivation of the same extension.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{info, warn};

use plinth_protocols::error::RegistryError;
use plinth_protocols::event::{RegistryEvent, RegistryEventKind};
use plinth_protocols::extension::{Extension, ExtensionContext, ExtensionManifest, ExtensionStatus};
use plinth_protocols::subscriber::{SubscriberId, Subscribers};
use plinth_protocols::{
    ChannelDefinition, Host, RuntimeContribution, ServiceDefinition, ToolDefinition, UiSlot,
};

/// Options for registering an extension.
#[derive(Debug, Clone, Default)]
pub struct RegisterOptions {
    /// Host-provided configuration handed to the extension's context.
    pub config: serde_json::Value,
}

/// Public view of one registry entry. Contributions stay owned by the
/// registry; external holders only see copies.
#[derive(Debug, Clone)]
pub struct RegistryEntrySnapshot {
    pub manifest: ExtensionManifest,
    pub status: ExtensionStatus,
    pub last_error: Option<String>,
}

struct Entry {
    extension: Arc<dyn Extension>,
    manifest: ExtensionManifest,
    status: ExtensionStatus,
    contribution: Option<RuntimeContribution>,
    context: ExtensionContext,
    last_error: Option<String>,
}

/// Registry for managing extension lifecycle.
pub struct ExtensionRegistry {
    host: Arc<dyn Host>,
    entries: RwLock<HashMap<String, Entry>>,
    id_locks: DashMap<String, Arc<Mutex<()>>>,
    events: Subscribers<RegistryEvent>,
}

impl ExtensionRegistry {
    /// Create a new registry bound to a host capability surface.
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self {
            host,
            entries: RwLock::new(HashMap::new()),
            id_locks: DashMap::new(),
            events: Subscribers::new(),
        }
    }

    /// Register and activate an extension.
    ///
    /// Rejects a duplicate id without mutating state. On activation
    /// failure the entry transitions to `Failed`, the error is recorded on
    /// it, an `error` event is emitted, and the extension is excluded from
    /// the aggregate views; the caller also receives the error.
    pub async fn register(
        &self,
        extension: Arc<dyn Extension>,
        options: RegisterOptions,
    ) -> Result<(), RegistryError> {
        let manifest = extension.manifest().clone();
        let id = manifest.id.clone();

        let lock = self.id_lock(&id);
        let _guard = lock.lock().await;

        {
            let mut entries = self.entries.write();
            if entries.contains_key(&id) {
                return Err(RegistryError::AlreadyRegistered(id));
            }

            let context = ExtensionContext::new(&id, options.config);
            entries.insert(
                id.clone(),
                Entry {
                    extension: extension.clone(),
                    manifest: manifest.clone(),
                    status: ExtensionStatus::Activating,
                    contribution: None,
                    context,
                    last_error: None,
                },
            );
        }
        self.emit(RegistryEvent::new(RegistryEventKind::Registered, &id));

        // Capability subset check, before activate and before any side
        // effect in the extension.
        let missing: Vec<_> = manifest
            .required_capabilities
            .difference(self.host.capabilities())
            .copied()
            .collect();
        if !missing.is_empty() {
            let err = RegistryError::MissingCapabilities {
                extension: id.clone(),
                missing,
            };
            self.fail_entry(&id, err.to_string());
            return Err(err);
        }

        let context = match self.entry_context(&id) {
            Some(context) => context,
            None => return Err(RegistryError::NotFound(id)),
        };

        match extension.activate(self.host.clone(), &context).await {
            Ok(contribution) => {
                {
                    let mut entries = self.entries.write();
                    if let Some(entry) = entries.get_mut(&id) {
                        entry.status = ExtensionStatus::Active;
                        entry.contribution = Some(contribution);
                    }
                }
                info!(extension = %id, version = %manifest.version, "extension activated");
                self.emit(RegistryEvent::new(RegistryEventKind::Activated, &id));
                Ok(())
            }
            Err(source) => {
                self.fail_entry(&id, source.to_string());
                Err(RegistryError::Activation {
                    extension: id,
                    source,
                })
            }
        }
    }

    /// Deactivate and remove an extension.
    ///
    /// Returns [`RegistryError::NotFound`] for an unknown id without
    /// touching any state. Teardown is best-effort: a failing dispose hook
    /// or `deactivate` is logged and never blocks entry removal.
    pub async fn unregister(&self, id: &str) -> Result<(), RegistryError> {
        let lock = self.id_lock(id);
        let guard = lock.lock().await;

        let result = self.unregister_locked(id).await;

        drop(guard);
        // Prune the per-id lock unless a racing caller holds its own clone
        // (count 2 = the map's entry plus this call's).
        self.id_locks
            .remove_if(id, |_, entry| Arc::strong_count(entry) == 2);
        result
    }

    async fn unregister_locked(&self, id: &str) -> Result<(), RegistryError> {
        let (extension, context, contribution, was_active) = {
            let mut entries = self.entries.write();
            let entry = entries
                .get_mut(id)
                .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;

            let was_active = entry.status == ExtensionStatus::Active;
            entry.status = ExtensionStatus::Deactivating;
            (
                entry.extension.clone(),
                entry.context.clone(),
                entry.contribution.take(),
                was_active,
            )
        };

        if let Some(dispose) = contribution.and_then(|c| c.dispose) {
            if catch_unwind(AssertUnwindSafe(|| dispose())).is_err() {
                warn!(extension = %id, "dispose hook panicked during teardown");
            }
        }

        if was_active {
            if let Err(e) = extension.deactivate(&context).await {
                warn!(extension = %id, error = %e, "deactivate failed; removing entry anyway");
            }
            self.emit(RegistryEvent::new(RegistryEventKind::Deactivated, id));
        }

        self.entries.write().remove(id);
        info!(extension = %id, "extension unregistered");
        self.emit(RegistryEvent::new(RegistryEventKind::Unregistered, id));
        Ok(())
    }

    /// Get a snapshot of one entry.
    pub fn get(&self, id: &str) -> Option<RegistryEntrySnapshot> {
        self.entries.read().get(id).map(Entry::snapshot)
    }

    /// List snapshots of every entry, Failed ones included.
    pub fn list(&self) -> Vec<RegistryEntrySnapshot> {
        self.entries.read().values().map(Entry::snapshot).collect()
    }

    /// Check whether an id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.read().contains_key(id)
    }

    /// All tools contributed by Active extensions.
    pub fn all_tools(&self) -> Vec<ToolDefinition> {
        self.collect_active(|c| c.tools.clone())
    }

    /// All services contributed by Active extensions.
    pub fn all_services(&self) -> Vec<ServiceDefinition> {
        self.collect_active(|c| c.services.clone())
    }

    /// All state channels contributed by Active extensions.
    pub fn all_state_channels(&self) -> Vec<ChannelDefinition> {
        self.collect_active(|c| c.state_channels.clone())
    }

    /// All UI slots contributed by Active extensions.
    pub fn all_slots(&self) -> Vec<UiSlot> {
        self.collect_active(|c| c.slots.clone())
    }

    /// Subscribe to lifecycle events. Dispatch is synchronous and a
    /// panicking listener never blocks delivery to the others.
    pub fn subscribe(&self, listener: impl Fn(&RegistryEvent) + Send + Sync + 'static) -> SubscriberId {
        self.events.add(listener)
    }

    /// Remove an event listener; idempotent.
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.events.remove(id);
    }

    fn collect_active<T>(&self, f: impl Fn(&RuntimeContribution) -> Vec<T>) -> Vec<T> {
        self.entries
            .read()
            .values()
            .filter(|entry| entry.status == ExtensionStatus::Active)
            .filter_map(|entry| entry.contribution.as_ref())
            .flat_map(|contribution| f(contribution))
            .collect()
    }

    fn id_lock(&self, id: &str) -> Arc<Mutex<()>> {
        self.id_locks
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn entry_context(&self, id: &str) -> Option<ExtensionContext> {
        self.entries.read().get(id).map(|entry| entry.context.clone())
    }

    fn fail_entry(&self, id: &str, message: String) {
        {
            let mut entries = self.entries.write();
            if let Some(entry) = entries.get_mut(id) {
                entry.status = ExtensionStatus::Failed;
                entry.contribution = None;
                entry.last_error = Some(message.clone());
            }
        }
        warn!(extension = %id, error = %message, "extension activation failed");
        self.emit(
            RegistryEvent::new(RegistryEventKind::Error, id)
                .with_payload(serde_json::json!({ "message": message })),
        );
    }

    fn emit(&self, event: RegistryEvent) {
        self.events.notify(&event);
    }
}

impl Entry {
    fn snapshot(&self) -> RegistryEntrySnapshot {
        RegistryEntrySnapshot {
            manifest: self.manifest.clone(),
            status: self.status,
            last_error: self.last_error.clone(),
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
