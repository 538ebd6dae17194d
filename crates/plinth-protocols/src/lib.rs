//! # Plinth Protocols
//!
//! Contract definitions for the plinth extension runtime. This crate
//! contains the types and traits shared between the runtime and its
//! embedders - no orchestration logic lives here.
//!
//! ## Core contracts
//!
//! - [`Extension`] - the shape of a pluggable unit (manifest + activate/deactivate)
//! - [`Host`] - the capability surface an embedding process injects
//! - [`RuntimeContribution`] - what an activated extension exposes
//! - [`SlotObservable`] - observable UI slot state
//! - [`RegistryEvent`] - lifecycle notifications

pub mod capability;
pub mod contribution;
pub mod error;
pub mod event;
pub mod extension;
pub mod slot;
pub mod subscriber;
pub mod types;

pub use capability::{
    Capability, Host, HostLogger, IpcBridge, IpcListener, IpcSubscription, LogLevel, Notification,
    Notifications, ScheduleOptions, Scheduler, Storage, TaskPriority, TimerHandle, Timers,
};
pub use contribution::{
    ChannelDefinition, DisposeFn, RuntimeContribution, ServiceDefinition, ToolDefinition, UiSlot,
};
pub use error::{DiscoveryError, ExtensionError, HostError, RegistryError};
pub use event::{RegistryEvent, RegistryEventKind};
pub use extension::{Extension, ExtensionContext, ExtensionManifest, ExtensionStatus};
pub use slot::{
    BadgeValue, ListBody, ListPanel, PanelAction, PanelConfig, PanelItem, PanelSection,
    SlotListener, SlotObservable, SlotSource, SlotState,
};
pub use subscriber::{SubscriberId, Subscribers};
pub use types::Metadata;
