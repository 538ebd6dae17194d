//! Configuration errors.

use std::fmt;

use thiserror::Error;

/// The schema rule a value violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationRule {
    Type,
    MinLength,
    MaxLength,
    Pattern,
    Min,
    Max,
    Options,
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationRule::Type => "type",
            ValidationRule::MinLength => "minLength",
            ValidationRule::MaxLength => "maxLength",
            ValidationRule::Pattern => "pattern",
            ValidationRule::Min => "min",
            ValidationRule::Max => "max",
            ValidationRule::Options => "options",
        };
        f.write_str(name)
    }
}

/// Errors returned by the config manager and validator.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value violated its field descriptor. The message names the field
    /// and the violated rule.
    #[error("Invalid value for {field} ({rule}): {message}")]
    Validation {
        field: String,
        rule: ValidationRule,
        message: String,
    },

    /// The field has no descriptor in the schema.
    #[error("Unknown config field: {0}")]
    UnknownField(String),

    #[error("Config load failed: {0}")]
    LoadFailed(String),

    #[error("Config save failed: {0}")]
    SaveFailed(String),
}

impl ConfigError {
    pub(crate) fn validation(
        field: &str,
        rule: ValidationRule,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation {
            field: field.to_string(),
            rule,
            message: message.into(),
        }
    }
}
