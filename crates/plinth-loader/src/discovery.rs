//! Package discovery scan.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use plinth_protocols::error::DiscoveryError;

use crate::manifest::{PackageManifest, ARTIFACT_DIR, MANIFEST_FILE};

/// A package that passed every discovery check.
#[derive(Debug, Clone)]
pub struct DiscoveredPackage {
    pub name: String,
    pub path: PathBuf,
    pub manifest: PackageManifest,
}

/// Class of a per-package failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureSeverity {
    /// The package is not a loadable extension.
    Error,
    /// The package is invalid but the problem is recoverable (for
    /// example a missing build).
    Warning,
}

/// One package that failed a discovery check.
#[derive(Debug, Clone)]
pub struct DiscoveryFailure {
    pub path: PathBuf,
    pub reason: String,
    pub severity: FailureSeverity,
}

/// Aggregate result of one scan.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryReport {
    pub packages: Vec<DiscoveredPackage>,
    pub failures: Vec<DiscoveryFailure>,
}

impl DiscoveryReport {
    fn fail(&mut self, path: &Path, severity: FailureSeverity, reason: impl Into<String>) {
        let reason = reason.into();
        debug!(path = %path.display(), %reason, "package rejected during discovery");
        self.failures.push(DiscoveryFailure {
            path: path.to_path_buf(),
            reason,
            severity,
        });
    }
}

/// Scan a root directory of candidate package subdirectories.
///
/// Every candidate is validated independently; bad packages land in the
/// failure list and the scan continues. Hidden (dot-prefixed)
/// subdirectories and plain files are skipped silently. A missing root is
/// an empty report, not an error. Duplicate package names are resolved
/// first-wins in directory-name order; later duplicates are recorded as
/// conflicts.
pub async fn scan_packages(root: &Path) -> Result<DiscoveryReport, DiscoveryError> {
    let mut report = DiscoveryReport::default();

    match tokio::fs::metadata(root).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(root = %root.display(), "package root does not exist");
            return Ok(report);
        }
        Err(source) => {
            return Err(DiscoveryError::Io {
                path: root.to_path_buf(),
                source,
            });
        }
    }

    let mut read_dir = tokio::fs::read_dir(root).await.map_err(|source| {
        DiscoveryError::Io {
            path: root.to_path_buf(),
            source,
        }
    })?;

    let mut candidates = Vec::new();
    while let Some(entry) = read_dir.next_entry().await.map_err(|source| {
        DiscoveryError::Io {
            path: root.to_path_buf(),
            source,
        }
    })? {
        candidates.push(entry.path());
    }
    // Deterministic order makes the first-wins duplicate policy stable.
    candidates.sort();

    let mut claimed_names = BTreeSet::new();
    for path in candidates {
        let Some(dir_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if dir_name.starts_with('.') || !is_dir(&path).await {
            continue;
        }

        scan_candidate(&path, &mut claimed_names, &mut report).await;
    }

    debug!(
        root = %root.display(),
        valid = report.packages.len(),
        failed = report.failures.len(),
        "package scan finished"
    );
    Ok(report)
}

async fn scan_candidate(
    path: &Path,
    claimed_names: &mut BTreeSet<String>,
    report: &mut DiscoveryReport,
) {
    let manifest_path = path.join(MANIFEST_FILE);
    let raw = match tokio::fs::read_to_string(&manifest_path).await {
        Ok(raw) => raw,
        Err(_) => {
            report.fail(
                path,
                FailureSeverity::Error,
                format!("missing manifest file {}", MANIFEST_FILE),
            );
            return;
        }
    };

    let manifest: PackageManifest = match serde_json::from_str(&raw) {
        Ok(manifest) => manifest,
        Err(e) => {
            report.fail(
                path,
                FailureSeverity::Error,
                format!("manifest is not valid JSON: {}", e),
            );
            return;
        }
    };

    if !manifest.plinth_extension {
        report.fail(
            path,
            FailureSeverity::Error,
            "manifest does not declare the plinthExtension marker",
        );
        return;
    }

    let name = manifest.name.trim();
    if name.is_empty() {
        report.fail(path, FailureSeverity::Error, "manifest has an empty name");
        return;
    }

    if claimed_names.contains(name) {
        report.fail(
            path,
            FailureSeverity::Error,
            format!("package name {:?} conflicts with an earlier package", name),
        );
        return;
    }

    if !is_dir(&path.join(ARTIFACT_DIR)).await {
        report.fail(
            path,
            FailureSeverity::Warning,
            format!("missing built-artifact directory {}/", ARTIFACT_DIR),
        );
        return;
    }

    claimed_names.insert(name.to_string());
    report.packages.push(DiscoveredPackage {
        name: name.to_string(),
        path: path.to_path_buf(),
        manifest,
    });
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
