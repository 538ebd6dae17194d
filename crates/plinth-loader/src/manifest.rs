//! Extension package manifest.

use serde::{Deserialize, Serialize};

/// File name of the manifest inside a package directory.
pub const MANIFEST_FILE: &str = "extension.json";

/// Directory of built artifacts inside a package directory.
pub const ARTIFACT_DIR: &str = "dist";

/// Manifest file shape of one extension package on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The is-an-extension marker; packages without it are not
    /// extensions.
    #[serde(default)]
    pub plinth_extension: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_parses_camel_case_marker() {
        let manifest: PackageManifest = serde_json::from_str(
            r#"{"name":"tasks","version":"1.0.0","plinthExtension":true}"#,
        )
        .unwrap();
        assert_eq!(manifest.name, "tasks");
        assert!(manifest.plinth_extension);
    }

    #[test]
    fn test_marker_defaults_to_false() {
        let manifest: PackageManifest =
            serde_json::from_str(r#"{"name":"library"}"#).unwrap();
        assert!(!manifest.plinth_extension);
        assert!(manifest.version.is_none());
    }
}
