//! External installed-extensions record.
//!
//! Written by the installer that fetched the packages; read-only to this
//! runtime.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use plinth_protocols::error::DiscoveryError;

/// One installed extension as recorded by the installer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledExtension {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_at: Option<String>,
}

/// The record file: extension id to entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstalledRecord {
    #[serde(default)]
    pub extensions: BTreeMap<String, InstalledExtension>,
}

/// Read the record at `path`. A missing file is an empty record.
pub async fn read_record(path: &Path) -> Result<InstalledRecord, DiscoveryError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(InstalledRecord::default());
        }
        Err(source) => {
            return Err(DiscoveryError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&raw).map_err(|source| DiscoveryError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_record_parses_camel_case_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("extensions.json");
        fs::write(
            &path,
            r#"{
                "extensions": {
                    "tasks": {
                        "id": "tasks",
                        "name": "Tasks",
                        "version": "1.2.0",
                        "path": "/ext/tasks",
                        "repoUrl": "https://example.com/tasks.git",
                        "installedAt": "2025-11-02T10:00:00Z"
                    }
                }
            }"#,
        )
        .unwrap();

        let record = read_record(&path).await.unwrap();
        let entry = record.extensions.get("tasks").unwrap();
        assert_eq!(entry.version, "1.2.0");
        assert_eq!(entry.repo_url.as_deref(), Some("https://example.com/tasks.git"));
        assert!(entry.installed_at.as_deref().unwrap().starts_with("2025"));
    }

    #[tokio::test]
    async fn test_missing_record_is_empty() {
        let dir = TempDir::new().unwrap();
        let record = read_record(&dir.path().join("none.json")).await.unwrap();
        assert!(record.extensions.is_empty());
    }
}
