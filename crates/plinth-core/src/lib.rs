//! # Plinth Core
//!
//! The orchestration layer of the extension runtime:
//!
//! - [`ExtensionRegistry`] - holds registered extensions, drives the
//!   activation/deactivation state machine, and emits lifecycle events
//! - [`ExtensionDefinition`] / [`build_extension`] - declarative assembly
//!   of an extension from configuration
//! - [`SlotStateStore`] / [`DerivedSlotStore`] - observable UI slot state

pub mod factory;
pub mod registry;
pub mod slot_store;

pub use factory::{
    build_extension, DeclaredExtension, DestroyHookFn, ExtensionDefinition, InitHookFn,
    RuntimeFactoryFn, RuntimeParts,
};
pub use registry::{ExtensionRegistry, RegisterOptions, RegistryEntrySnapshot};
pub use slot_store::{DerivedSlotStore, SlotStatePatch, SlotStateStore};
