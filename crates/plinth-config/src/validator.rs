//! Per-kind value validation.
//!
//! One validation function per field kind, producing a structured
//! violation (field, rule, message) instead of a free-text guess. Order:
//! type match first, then the kind-specific constraints.

use regex::Regex;

use crate::error::{ConfigError, ValidationRule};
use crate::schema::{ConfigValue, FieldDescriptor, FieldKind, SelectOption};

/// Validate one value against its field descriptor.
pub fn validate_value(
    field: &str,
    descriptor: &FieldDescriptor,
    value: &ConfigValue,
) -> Result<(), ConfigError> {
    match &descriptor.kind {
        FieldKind::String {
            min_length,
            max_length,
            pattern,
        } => validate_string(field, value, *min_length, *max_length, pattern.as_deref()),
        FieldKind::Number { min, max } => validate_number(field, value, *min, *max),
        FieldKind::Boolean => validate_boolean(field, value),
        FieldKind::Select { options } => validate_select(field, value, options),
    }
}

fn validate_string(
    field: &str,
    value: &ConfigValue,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<&str>,
) -> Result<(), ConfigError> {
    let text = match value {
        ConfigValue::Text(text) => text,
        other => {
            return Err(type_mismatch(field, "string", other));
        }
    };

    if let Some(min) = min_length {
        if text.chars().count() < min {
            return Err(ConfigError::validation(
                field,
                ValidationRule::MinLength,
                format!("length {} is below minLength {}", text.chars().count(), min),
            ));
        }
    }
    if let Some(max) = max_length {
        if text.chars().count() > max {
            return Err(ConfigError::validation(
                field,
                ValidationRule::MaxLength,
                format!("length {} exceeds maxLength {}", text.chars().count(), max),
            ));
        }
    }
    if let Some(pattern) = pattern {
        let regex = Regex::new(pattern).map_err(|e| {
            ConfigError::validation(
                field,
                ValidationRule::Pattern,
                format!("invalid pattern {:?}: {}", pattern, e),
            )
        })?;
        if !regex.is_match(text) {
            return Err(ConfigError::validation(
                field,
                ValidationRule::Pattern,
                format!("value does not match pattern {:?}", pattern),
            ));
        }
    }
    Ok(())
}

fn validate_number(
    field: &str,
    value: &ConfigValue,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<(), ConfigError> {
    let number = match value {
        ConfigValue::Number(number) => *number,
        other => {
            return Err(type_mismatch(field, "number", other));
        }
    };

    if let Some(min) = min {
        if number < min {
            return Err(ConfigError::validation(
                field,
                ValidationRule::Min,
                format!("{} is below min {}", number, min),
            ));
        }
    }
    if let Some(max) = max {
        if number > max {
            return Err(ConfigError::validation(
                field,
                ValidationRule::Max,
                format!("{} exceeds max {}", number, max),
            ));
        }
    }
    Ok(())
}

fn validate_boolean(field: &str, value: &ConfigValue) -> Result<(), ConfigError> {
    match value {
        ConfigValue::Bool(_) => Ok(()),
        other => Err(type_mismatch(field, "boolean", other)),
    }
}

fn validate_select(
    field: &str,
    value: &ConfigValue,
    options: &[SelectOption],
) -> Result<(), ConfigError> {
    if options.iter().any(|option| option.value == *value) {
        Ok(())
    } else {
        Err(ConfigError::validation(
            field,
            ValidationRule::Options,
            "value is not one of the declared options".to_string(),
        ))
    }
}

fn type_mismatch(field: &str, expected: &str, actual: &ConfigValue) -> ConfigError {
    ConfigError::validation(
        field,
        ValidationRule::Type,
        format!("expected {}, got {}", expected, actual.type_name()),
    )
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
