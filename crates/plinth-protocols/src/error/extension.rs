//! Extension-related errors.

use thiserror::Error;

/// Errors produced by extensions and the declarative factory.
#[derive(Debug, Error)]
pub enum ExtensionError {
    /// The declarative definition is malformed; the extension is never
    /// built.
    #[error("Invalid extension definition: {0}")]
    InvalidDefinition(String),

    #[error("Extension activation failed: {0}")]
    ActivationFailed(String),

    /// Activation succeeded but yielded no tools, services, channels, or
    /// slots.
    #[error("Extension {0} produced an empty contribution")]
    EmptyContribution(String),

    #[error("Extension deactivation failed: {0}")]
    DeactivationFailed(String),

    #[error("{0}")]
    Custom(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_definition_display() {
        let err = ExtensionError::InvalidDefinition("id must not be empty".to_string());
        let display = err.to_string();
        assert!(display.contains("Invalid extension definition"));
        assert!(display.contains("id must not be empty"));
    }

    #[test]
    fn test_empty_contribution_display() {
        let err = ExtensionError::EmptyContribution("tasks".to_string());
        let display = err.to_string();
        assert!(display.contains("tasks"));
        assert!(display.contains("empty contribution"));
    }

    #[test]
    fn test_custom_display() {
        let err = ExtensionError::Custom("boom".to_string());
        assert_eq!(err.to_string(), "boom");
    }
}
