use super::*;

#[test]
fn test_manifest_builder() {
    let manifest = ExtensionManifest::new("tasks", "Tasks", "1.0.0")
        .with_description("A task tracker")
        .with_required_capabilities([Capability::Storage, Capability::Logger]);

    assert_eq!(manifest.id, "tasks");
    assert_eq!(manifest.name, "Tasks");
    assert_eq!(manifest.version, "1.0.0");
    assert_eq!(manifest.description.as_deref(), Some("A task tracker"));
    assert!(manifest.required_capabilities.contains(&Capability::Storage));
    assert!(manifest.required_capabilities.contains(&Capability::Logger));
}

#[test]
fn test_manifest_serde_round_trip() {
    let manifest = ExtensionManifest::new("media", "Media", "0.3.1")
        .with_required_capabilities([Capability::Ipc]);

    let json = serde_json::to_string(&manifest).unwrap();
    assert!(json.contains("requiredCapabilities"));
    assert!(json.contains("\"ipc\""));

    let parsed: ExtensionManifest = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, manifest);
}

#[test]
fn test_manifest_capabilities_default_empty() {
    let parsed: ExtensionManifest =
        serde_json::from_str(r#"{"id":"a","name":"A","version":"1.0.0"}"#).unwrap();
    assert!(parsed.required_capabilities.is_empty());
    assert!(parsed.description.is_none());
}
