//! Discovery-related errors.
//!
//! Per-package problems during a scan are data (failure entries in the
//! report), not errors; these variants cover faults of the scan itself.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the package loader.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
