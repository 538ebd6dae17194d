//! # Plinth
//!
//! A host-agnostic extension runtime. Plinth discovers extension packages
//! on disk, activates them against a capability-scoped host surface,
//! validates and persists their configuration, and synchronizes
//! extension-contributed UI slot state with observers.
//!
//! The workspace is split the same way its pieces depend on each other:
//!
//! - [`protocols`] - contracts only: capability traits, the extension
//!   trait, contribution types, slot state, events, errors
//! - [`runtime`] - the extension registry, the declarative factory, and
//!   the slot state stores
//! - [`config`] - schema-driven per-extension configuration
//! - [`loader`] - filesystem discovery of extension packages

pub use plinth_config as config;
pub use plinth_core as runtime;
pub use plinth_loader as loader;
pub use plinth_protocols as protocols;

pub use plinth_config::{ConfigManager, ConfigStore};
pub use plinth_core::{
    DerivedSlotStore, ExtensionDefinition, ExtensionRegistry, RegisterOptions, SlotStateStore,
};
pub use plinth_loader::{scan_packages, DiscoveryReport};
pub use plinth_protocols::{
    Capability, Extension, ExtensionContext, ExtensionManifest, Host, RegistryEvent,
    RuntimeContribution,
};
