use super::*;

use std::fs;

use tempfile::TempDir;

fn write_package(root: &Path, dir: &str, manifest: &str, with_dist: bool) {
    let package_dir = root.join(dir);
    fs::create_dir_all(&package_dir).unwrap();
    fs::write(package_dir.join(MANIFEST_FILE), manifest).unwrap();
    if with_dist {
        fs::create_dir_all(package_dir.join(ARTIFACT_DIR)).unwrap();
    }
}

fn valid_manifest(name: &str) -> String {
    format!(r#"{{"name":"{}","version":"1.0.0","plinthExtension":true}}"#, name)
}

#[tokio::test]
async fn test_scan_counts_valid_and_failed_packages() {
    let root = TempDir::new().unwrap();
    write_package(root.path(), "alpha", &valid_manifest("alpha"), true);
    write_package(root.path(), "beta", &valid_manifest("beta"), true);
    write_package(root.path(), "gamma", r#"{"name":"gamma"}"#, true);
    fs::create_dir_all(root.path().join("empty")).unwrap();

    let report = scan_packages(root.path()).await.unwrap();

    assert_eq!(report.packages.len(), 2);
    assert_eq!(report.failures.len(), 2);
    assert!(report.failures.iter().all(|f| !f.reason.is_empty()));
}

#[tokio::test]
async fn test_missing_manifest_is_recorded_failure() {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("bare")).unwrap();

    let report = scan_packages(root.path()).await.unwrap();

    assert!(report.packages.is_empty());
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].reason.contains(MANIFEST_FILE));
    assert_eq!(report.failures[0].severity, FailureSeverity::Error);
}

#[tokio::test]
async fn test_unparseable_manifest_is_recorded_failure() {
    let root = TempDir::new().unwrap();
    write_package(root.path(), "broken", "{not json", true);

    let report = scan_packages(root.path()).await.unwrap();
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].reason.contains("JSON"));
}

#[tokio::test]
async fn test_missing_marker_is_validation_failure() {
    let root = TempDir::new().unwrap();
    write_package(
        root.path(),
        "library",
        r#"{"name":"library","plinthExtension":false}"#,
        true,
    );

    let report = scan_packages(root.path()).await.unwrap();
    assert!(report.packages.is_empty());
    assert!(report.failures[0].reason.contains("plinthExtension"));
}

#[tokio::test]
async fn test_empty_name_is_validation_failure() {
    let root = TempDir::new().unwrap();
    write_package(
        root.path(),
        "anon",
        r#"{"name":"  ","plinthExtension":true}"#,
        true,
    );

    let report = scan_packages(root.path()).await.unwrap();
    assert!(report.packages.is_empty());
    assert!(report.failures[0].reason.contains("name"));
}

#[tokio::test]
async fn test_missing_artifact_dir_is_warning() {
    let root = TempDir::new().unwrap();
    write_package(root.path(), "unbuilt", &valid_manifest("unbuilt"), false);

    let report = scan_packages(root.path()).await.unwrap();

    assert!(report.packages.is_empty());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].severity, FailureSeverity::Warning);
    assert!(report.failures[0].reason.contains(ARTIFACT_DIR));
}

#[tokio::test]
async fn test_hidden_directories_are_skipped_silently() {
    let root = TempDir::new().unwrap();
    write_package(root.path(), ".git", &valid_manifest("hidden"), true);
    write_package(root.path(), "visible", &valid_manifest("visible"), true);

    let report = scan_packages(root.path()).await.unwrap();

    assert_eq!(report.packages.len(), 1);
    assert_eq!(report.packages[0].name, "visible");
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn test_plain_files_are_skipped_silently() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("README.md"), "not a package").unwrap();

    let report = scan_packages(root.path()).await.unwrap();
    assert!(report.packages.is_empty());
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn test_duplicate_names_first_wins_with_conflict_recorded() {
    let root = TempDir::new().unwrap();
    write_package(root.path(), "a-tasks", &valid_manifest("tasks"), true);
    write_package(root.path(), "b-tasks", &valid_manifest("tasks"), true);

    let report = scan_packages(root.path()).await.unwrap();

    assert_eq!(report.packages.len(), 1);
    assert!(report.packages[0].path.ends_with("a-tasks"));
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].reason.contains("conflicts"));
}

#[tokio::test]
async fn test_missing_root_yields_empty_report() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("nope");

    let report = scan_packages(&missing).await.unwrap();
    assert!(report.packages.is_empty());
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn test_discovered_package_resolves_name_and_path() {
    let root = TempDir::new().unwrap();
    write_package(root.path(), "dir-name", &valid_manifest("manifest-name"), true);

    let report = scan_packages(root.path()).await.unwrap();

    let package = &report.packages[0];
    assert_eq!(package.name, "manifest-name");
    assert_eq!(package.path, root.path().join("dir-name"));
    assert_eq!(package.manifest.version.as_deref(), Some("1.0.0"));
}
