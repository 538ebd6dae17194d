//! Host capability errors.

use thiserror::Error;

/// Errors surfaced by host capability implementations.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Storage operation failed: {0}")]
    Storage(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}
