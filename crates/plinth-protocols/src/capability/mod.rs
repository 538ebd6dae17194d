//! Host capability surface.
//!
//! A capability is an opaque tag the embedding process advertises via a
//! set. The runtime only consumes these contracts - it never implements
//! them. An extension whose `required_capabilities` are not a subset of
//! the host's set fails activation before any side effect occurs;
//! optional capabilities are reached through the `Option` accessors on
//! [`Host`].

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

mod ipc;
mod logger;
mod notifications;
mod scheduler;
mod storage;
mod timers;

pub use ipc::{IpcBridge, IpcListener, IpcSubscription};
pub use logger::{HostLogger, LogLevel};
pub use notifications::{Notification, Notifications};
pub use scheduler::{ScheduleOptions, Scheduler, TaskPriority};
pub use storage::Storage;
pub use timers::{TimerHandle, Timers};

/// Capability tag advertised by a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Storage,
    Timers,
    Scheduler,
    Notifications,
    Ipc,
    Logger,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Storage => "storage",
            Capability::Timers => "timers",
            Capability::Scheduler => "scheduler",
            Capability::Notifications => "notifications",
            Capability::Ipc => "ipc",
            Capability::Logger => "logger",
        };
        f.write_str(name)
    }
}

/// The capability surface an embedding process injects into the runtime.
///
/// `capabilities()` is the declared set used for the subset check at
/// activation time. The accessors default to `None`; a host implements
/// only the capabilities it advertises, and extensions must check
/// presence before using a non-required capability.
pub trait Host: Send + Sync {
    /// The set of capabilities this host advertises.
    fn capabilities(&self) -> &BTreeSet<Capability>;

    fn storage(&self) -> Option<Arc<dyn Storage>> {
        None
    }

    fn timers(&self) -> Option<Arc<dyn Timers>> {
        None
    }

    fn scheduler(&self) -> Option<Arc<dyn Scheduler>> {
        None
    }

    fn notifications(&self) -> Option<Arc<dyn Notifications>> {
        None
    }

    fn ipc(&self) -> Option<Arc<dyn IpcBridge>> {
        None
    }

    fn logger(&self) -> Option<Arc<dyn HostLogger>> {
        None
    }
}
