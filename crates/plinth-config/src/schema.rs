//! Config schema types.
//!
//! A schema maps field keys to typed, constraint-bearing descriptors. The
//! field kinds form a closed enum with one validation function per kind
//! (see [`crate::validator`]).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A scalar configuration value.
///
/// The untagged variants are ordered so booleans and numbers are tried
/// before free text during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ConfigValue {
    /// The user-facing type name used in validation messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Number(_) => "number",
            ConfigValue::Text(_) => "string",
        }
    }

    /// True for the empty string; other values are never "empty".
    pub fn is_empty_text(&self) -> bool {
        matches!(self, ConfigValue::Text(s) if s.is_empty())
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Text(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Number(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

/// One selectable option of a `select` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: ConfigValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SelectOption {
    pub fn new(value: impl Into<ConfigValue>) -> Self {
        Self {
            value: value.into(),
            label: None,
        }
    }
}

/// The closed set of field kinds, with kind-specific constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    String {
        #[serde(default, rename = "minLength", skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        #[serde(default, rename = "maxLength", skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Boolean,
    Select {
        options: Vec<SelectOption>,
    },
}

impl FieldKind {
    pub fn string() -> Self {
        FieldKind::String {
            min_length: None,
            max_length: None,
            pattern: None,
        }
    }

    pub fn number() -> Self {
        FieldKind::Number {
            min: None,
            max: None,
        }
    }
}

/// Descriptor for one configurable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ConfigValue>,
    #[serde(default)]
    pub secret: bool,
}

impl FieldDescriptor {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
            default: None,
            secret: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<ConfigValue>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Schema: field key to descriptor.
pub type ConfigSchema = BTreeMap<String, FieldDescriptor>;

/// Values: field key to scalar value.
pub type ConfigValues = BTreeMap<String, ConfigValue>;
