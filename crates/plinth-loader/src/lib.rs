//! # Plinth Loader
//!
//! Filesystem-facing discovery: scans a root directory of candidate
//! extension packages, validates their manifests, and reports per-package
//! success or failure. Partial failure is the normal case, not an
//! exception path - a single bad package never aborts the scan.

pub mod discovery;
pub mod manifest;
pub mod record;

pub use discovery::{
    scan_packages, DiscoveredPackage, DiscoveryFailure, DiscoveryReport, FailureSeverity,
};
pub use manifest::{PackageManifest, ARTIFACT_DIR, MANIFEST_FILE};
pub use record::{read_record, InstalledExtension, InstalledRecord};
