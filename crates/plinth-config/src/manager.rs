//! Per-extension config manager.
//!
//! Built on the validator with load/save indirection: persistence is an
//! injected [`ConfigStore`], never this crate's own. Batch mutation is
//! all-or-nothing, and persist happens before notify, so observers may
//! assume durability on receipt of a change notification.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::warn;

use plinth_protocols::subscriber::{SubscriberId, Subscribers};

use crate::error::ConfigError;
use crate::schema::{ConfigSchema, ConfigValue, ConfigValues};
use crate::validator::validate_value;

/// Mask substituted for non-empty secret values in status reporting.
pub const SECRET_MASK: &str = "********";

/// Injected persistence seam for one extension's config values.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load persisted values; `None` when nothing was persisted yet.
    async fn load(&self, extension_id: &str) -> Result<Option<ConfigValues>, ConfigError>;

    async fn save(&self, extension_id: &str, values: &ConfigValues) -> Result<(), ConfigError>;
}

/// Computed configuration status for display surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigStatus {
    /// True iff no required field is unset or an empty string.
    pub is_configured: bool,
    pub missing_fields: Vec<String>,
    /// Current values with secret fields masked. Redaction is
    /// display-only; the stored values are untouched.
    pub values: ConfigValues,
}

/// Per-extension config store built on the schema validator.
pub struct ConfigManager {
    extension_id: String,
    schema: ConfigSchema,
    store: Arc<dyn ConfigStore>,
    values: RwLock<ConfigValues>,
    subscribers: Subscribers<ConfigValues>,
}

impl ConfigManager {
    /// Create a manager with schema defaults applied.
    pub fn new(
        extension_id: impl Into<String>,
        schema: ConfigSchema,
        store: Arc<dyn ConfigStore>,
    ) -> Self {
        let defaults = Self::defaults_of(&schema);
        Self {
            extension_id: extension_id.into(),
            schema,
            store,
            values: RwLock::new(defaults),
            subscribers: Subscribers::new(),
        }
    }

    /// Load persisted values and merge them over the defaults; persisted
    /// values win. A failing load is logged and swallowed, leaving the
    /// manager on defaults.
    pub async fn initialize(&self) {
        match self.store.load(&self.extension_id).await {
            Ok(Some(persisted)) => {
                let mut values = self.values.write();
                for (key, value) in persisted {
                    values.insert(key, value);
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!(
                    extension = %self.extension_id,
                    error = %e,
                    "config load failed; staying on schema defaults"
                );
            }
        }
    }

    /// Validate and set a single field, then persist and notify.
    pub async fn set_value(
        &self,
        key: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) -> Result<(), ConfigError> {
        let mut batch = ConfigValues::new();
        batch.insert(key.into(), value.into());
        self.set_values(batch).await
    }

    /// Validate and set a batch of fields atomically.
    ///
    /// The whole map is validated first; if any field fails, nothing is
    /// mutated. On success the new values are persisted, committed, and
    /// only then broadcast to subscribers as a fresh snapshot.
    pub async fn set_values(&self, batch: ConfigValues) -> Result<(), ConfigError> {
        for (key, value) in &batch {
            let descriptor = self
                .schema
                .get(key)
                .ok_or_else(|| ConfigError::UnknownField(key.clone()))?;
            validate_value(key, descriptor, value)?;
        }

        let next = {
            let values = self.values.read();
            let mut next = values.clone();
            next.extend(batch);
            next
        };

        self.commit(next).await
    }

    /// Get a copy of the current values, unredacted.
    pub fn values(&self) -> ConfigValues {
        self.values.read().clone()
    }

    /// Get one value by key.
    pub fn value(&self, key: &str) -> Option<ConfigValue> {
        self.values.read().get(key).cloned()
    }

    /// Compute the display status: configured flag, missing required
    /// fields, and values with secrets masked.
    pub fn status(&self) -> ConfigStatus {
        let values = self.values.read();

        let mut missing_fields = Vec::new();
        for (key, descriptor) in &self.schema {
            if !descriptor.required {
                continue;
            }
            let unset = match values.get(key) {
                None => true,
                Some(value) => value.is_empty_text(),
            };
            if unset {
                missing_fields.push(key.clone());
            }
        }

        let mut redacted = values.clone();
        for (key, value) in redacted.iter_mut() {
            // Values without a descriptor pass through unredacted.
            let secret = self.schema.get(key).map(|d| d.secret).unwrap_or(false);
            if secret && !value.is_empty_text() {
                *value = ConfigValue::Text(SECRET_MASK.to_string());
            }
        }

        ConfigStatus {
            is_configured: missing_fields.is_empty(),
            missing_fields,
            values: redacted,
        }
    }

    /// Reset to schema defaults, persist, and notify.
    pub async fn clear(&self) -> Result<(), ConfigError> {
        self.commit(Self::defaults_of(&self.schema)).await
    }

    /// Subscribe to change notifications. Each notification carries a
    /// fresh snapshot of the values, never a reference to internal state.
    pub fn subscribe(
        &self,
        listener: impl Fn(&ConfigValues) + Send + Sync + 'static,
    ) -> SubscriberId {
        self.subscribers.add(listener)
    }

    /// Remove a subscriber; idempotent.
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers.remove(id);
    }

    /// Persist, commit to memory, then notify, in that order. A failed
    /// save leaves memory and observers untouched.
    async fn commit(&self, next: ConfigValues) -> Result<(), ConfigError> {
        self.store.save(&self.extension_id, &next).await?;
        *self.values.write() = next.clone();
        self.subscribers.notify(&next);
        Ok(())
    }

    fn defaults_of(schema: &ConfigSchema) -> ConfigValues {
        schema
            .iter()
            .filter_map(|(key, descriptor)| {
                descriptor
                    .default
                    .clone()
                    .map(|default| (key.clone(), default))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
