use super::*;

use parking_lot::Mutex;

use crate::schema::{FieldDescriptor, FieldKind, SelectOption};

/// In-memory store that records the order of saves and notifications and
/// can be flipped to fail.
#[derive(Default)]
struct MemoryStore {
    persisted: Mutex<Option<ConfigValues>>,
    fail_load: bool,
    fail_save: bool,
    journal: Arc<Mutex<Vec<String>>>,
}

impl MemoryStore {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn with_persisted(values: ConfigValues) -> Arc<Self> {
        Arc::new(Self {
            persisted: Mutex::new(Some(values)),
            ..Self::default()
        })
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn load(&self, _extension_id: &str) -> Result<Option<ConfigValues>, ConfigError> {
        if self.fail_load {
            return Err(ConfigError::LoadFailed("disk unavailable".to_string()));
        }
        Ok(self.persisted.lock().clone())
    }

    async fn save(&self, _extension_id: &str, values: &ConfigValues) -> Result<(), ConfigError> {
        if self.fail_save {
            return Err(ConfigError::SaveFailed("disk unavailable".to_string()));
        }
        self.journal.lock().push("save".to_string());
        *self.persisted.lock() = Some(values.clone());
        Ok(())
    }
}

fn api_key_schema() -> ConfigSchema {
    let mut schema = ConfigSchema::new();
    schema.insert(
        "apiKey".to_string(),
        FieldDescriptor::new(FieldKind::String {
            min_length: Some(10),
            max_length: None,
            pattern: None,
        })
        .required()
        .secret(),
    );
    schema
}

fn settings_schema() -> ConfigSchema {
    let mut schema = ConfigSchema::new();
    schema.insert(
        "volume".to_string(),
        FieldDescriptor::new(FieldKind::Number {
            min: Some(0.0),
            max: Some(100.0),
        })
        .with_default(50.0),
    );
    schema.insert(
        "theme".to_string(),
        FieldDescriptor::new(FieldKind::Select {
            options: vec![SelectOption::new("dark"), SelectOption::new("light")],
        })
        .with_default("dark"),
    );
    schema
}

#[tokio::test]
async fn test_defaults_applied_at_construction() {
    let manager = ConfigManager::new("ext", settings_schema(), MemoryStore::new());

    assert_eq!(manager.value("volume"), Some(ConfigValue::Number(50.0)));
    assert_eq!(manager.value("theme"), Some(ConfigValue::from("dark")));
}

#[tokio::test]
async fn test_initialize_merges_persisted_over_defaults() {
    let mut persisted = ConfigValues::new();
    persisted.insert("theme".to_string(), ConfigValue::from("light"));
    let manager = ConfigManager::new("ext", settings_schema(), MemoryStore::with_persisted(persisted));

    manager.initialize().await;

    // Persisted wins; untouched fields keep their defaults.
    assert_eq!(manager.value("theme"), Some(ConfigValue::from("light")));
    assert_eq!(manager.value("volume"), Some(ConfigValue::Number(50.0)));
}

#[tokio::test]
async fn test_initialize_swallows_load_failure() {
    let store = Arc::new(MemoryStore {
        fail_load: true,
        ..MemoryStore::default()
    });
    let manager = ConfigManager::new("ext", settings_schema(), store);

    manager.initialize().await;
    assert_eq!(manager.value("volume"), Some(ConfigValue::Number(50.0)));
}

#[tokio::test]
async fn test_set_value_rejects_violation_and_keeps_state() {
    let manager = ConfigManager::new("ext", api_key_schema(), MemoryStore::new());

    let err = manager.set_value("apiKey", "short").await.unwrap_err();
    assert!(err.to_string().contains("minLength"));
    assert_eq!(manager.value("apiKey"), None);
}

#[tokio::test]
async fn test_set_value_accepts_and_masks_secret_in_status() {
    let manager = ConfigManager::new("ext", api_key_schema(), MemoryStore::new());

    manager.set_value("apiKey", "aaaaaaaaaa").await.unwrap();

    let status = manager.status();
    assert!(status.is_configured);
    assert_eq!(status.values.get("apiKey"), Some(&ConfigValue::from("********")));
    // Redaction is display-only.
    assert_eq!(manager.value("apiKey"), Some(ConfigValue::from("aaaaaaaaaa")));
}

#[tokio::test]
async fn test_set_values_is_atomic() {
    let manager = ConfigManager::new("ext", settings_schema(), MemoryStore::new());

    let mut batch = ConfigValues::new();
    batch.insert("volume".to_string(), ConfigValue::Number(30.0));
    batch.insert("theme".to_string(), ConfigValue::from("sepia"));

    let err = manager.set_values(batch).await.unwrap_err();
    assert!(err.to_string().contains("theme"));

    // Neither field was applied.
    assert_eq!(manager.value("volume"), Some(ConfigValue::Number(50.0)));
    assert_eq!(manager.value("theme"), Some(ConfigValue::from("dark")));
}

#[tokio::test]
async fn test_unknown_field_rejected() {
    let manager = ConfigManager::new("ext", settings_schema(), MemoryStore::new());

    let err = manager.set_value("nope", "x").await.unwrap_err();
    assert!(matches!(err, ConfigError::UnknownField(_)));
}

#[tokio::test]
async fn test_persist_happens_before_notify() {
    let store = MemoryStore::new();
    let journal = store.journal.clone();
    let manager = ConfigManager::new("ext", settings_schema(), store);

    let notify_journal = journal.clone();
    manager.subscribe(move |_values| {
        notify_journal.lock().push("notify".to_string());
    });

    manager.set_value("volume", 10.0).await.unwrap();

    assert_eq!(*journal.lock(), vec!["save", "notify"]);
}

#[tokio::test]
async fn test_failed_save_leaves_memory_and_observers_untouched() {
    let store = Arc::new(MemoryStore {
        fail_save: true,
        ..MemoryStore::default()
    });
    let manager = ConfigManager::new("ext", settings_schema(), store);

    let notified = Arc::new(Mutex::new(0usize));
    let notified_clone = notified.clone();
    manager.subscribe(move |_| *notified_clone.lock() += 1);

    let result = manager.set_value("volume", 10.0).await;
    assert!(matches!(result, Err(ConfigError::SaveFailed(_))));
    assert_eq!(manager.value("volume"), Some(ConfigValue::Number(50.0)));
    assert_eq!(*notified.lock(), 0);
}

#[tokio::test]
async fn test_status_reports_missing_required_fields() {
    let manager = ConfigManager::new("ext", api_key_schema(), MemoryStore::new());

    let status = manager.status();
    assert!(!status.is_configured);
    assert_eq!(status.missing_fields, vec!["apiKey".to_string()]);

    // An empty string still counts as missing.
    manager.set_value("apiKey", "").await.unwrap_err();
    manager.set_value("apiKey", "aaaaaaaaaa").await.unwrap();
    assert!(manager.status().is_configured);
}

#[tokio::test]
async fn test_clear_resets_persists_and_notifies() {
    let store = MemoryStore::new();
    let manager = ConfigManager::new("ext", settings_schema(), store.clone());
    manager.set_value("volume", 10.0).await.unwrap();

    let notified = Arc::new(Mutex::new(Vec::new()));
    let notified_clone = notified.clone();
    manager.subscribe(move |values| notified_clone.lock().push(values.clone()));

    manager.clear().await.unwrap();

    assert_eq!(manager.value("volume"), Some(ConfigValue::Number(50.0)));
    let persisted = store.persisted.lock().clone().unwrap();
    assert_eq!(persisted.get("volume"), Some(&ConfigValue::Number(50.0)));
    assert_eq!(notified.lock().len(), 1);
}

#[tokio::test]
async fn test_notification_carries_snapshot_not_reference() {
    let manager = Arc::new(ConfigManager::new("ext", settings_schema(), MemoryStore::new()));

    let seen = Arc::new(Mutex::new(None));
    let seen_clone = seen.clone();
    manager.subscribe(move |values| {
        *seen_clone.lock() = Some(values.clone());
    });

    manager.set_value("volume", 10.0).await.unwrap();
    let snapshot = seen.lock().clone().unwrap();
    assert_eq!(snapshot.get("volume"), Some(&ConfigValue::Number(10.0)));

    // Mutating the manager afterwards does not change the snapshot.
    manager.set_value("volume", 20.0).await.unwrap();
    assert_eq!(snapshot.get("volume"), Some(&ConfigValue::Number(10.0)));
}

#[tokio::test]
async fn test_unsubscribe_is_idempotent() {
    let manager = ConfigManager::new("ext", settings_schema(), MemoryStore::new());
    let count = Arc::new(Mutex::new(0usize));
    let count_clone = count.clone();
    let id = manager.subscribe(move |_| *count_clone.lock() += 1);

    manager.unsubscribe(id);
    manager.unsubscribe(id);
    manager.set_value("volume", 10.0).await.unwrap();

    assert_eq!(*count.lock(), 0);
}
