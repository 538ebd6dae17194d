//! Subscriber list with isolated per-listener dispatch.
//!
//! Every observable component in the runtime (registry events, config
//! change notifications, slot state stores) owns one of these instead of
//! an ad-hoc listener set. Dispatch is synchronous; a panicking listener
//! is caught and logged so it never blocks delivery to the others or
//! corrupts the notifying component's state.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::warn;

/// Handle identifying one subscription; removal is idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Subscriber list owned per component instance.
pub struct Subscribers<T> {
    entries: RwLock<Vec<(SubscriberId, Listener<T>)>>,
    next_id: AtomicU64,
}

impl<T> Subscribers<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Add a listener and return its handle.
    pub fn add(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entries.write().push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Removing an already-removed id is a no-op.
    pub fn remove(&self, id: SubscriberId) {
        self.entries.write().retain(|(entry_id, _)| *entry_id != id);
    }

    /// Notify every listener synchronously.
    ///
    /// Listener panics are caught and logged per listener; delivery to the
    /// remaining listeners always proceeds.
    pub fn notify(&self, value: &T) {
        let listeners: Vec<Listener<T>> = self
            .entries
            .read()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            if catch_unwind(AssertUnwindSafe(|| listener(value))).is_err() {
                warn!("subscriber panicked during notification; continuing delivery");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}
