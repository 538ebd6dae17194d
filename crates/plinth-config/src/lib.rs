//! # Plinth Config
//!
//! Schema-driven configuration for extensions: a field-typed schema with
//! per-kind validation rules, default application, secret redaction, and
//! a per-extension [`ConfigManager`] with injected persistence.

pub mod error;
pub mod manager;
pub mod schema;
pub mod validator;

pub use error::{ConfigError, ValidationRule};
pub use manager::{ConfigManager, ConfigStatus, ConfigStore};
pub use schema::{ConfigSchema, ConfigValue, ConfigValues, FieldDescriptor, FieldKind, SelectOption};
pub use validator::validate_value;
