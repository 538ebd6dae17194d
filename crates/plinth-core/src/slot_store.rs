//! Observable UI slot state stores.
//!
//! Two variants back extension-contributed panels:
//!
//! - [`SlotStateStore`] holds its state directly as immutable snapshots.
//! - [`DerivedSlotStore`] projects from an external [`SlotSource`] and
//!   caches the computed state behind a version counter, so `state()`
//!   returns the identical `Arc` between source notifications. Consumers
//!   compare snapshots by pointer identity to skip re-render work.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use plinth_protocols::slot::{
    BadgeValue, PanelConfig, SlotListener, SlotObservable, SlotSource, SlotState,
};
use plinth_protocols::subscriber::{SubscriberId, Subscribers};

/// Partial update applied by [`SlotStateStore::update`]. Absent fields
/// keep their current value.
#[derive(Debug, Clone, Default)]
pub struct SlotStatePatch {
    pub badge: Option<Option<BadgeValue>>,
    pub visible: Option<bool>,
    pub panel: Option<PanelConfig>,
}

/// Slot state container producing immutable snapshots.
pub struct SlotStateStore {
    state: RwLock<Arc<SlotState>>,
    subscribers: Subscribers<()>,
}

impl SlotStateStore {
    pub fn new(initial: SlotState) -> Self {
        Self {
            state: RwLock::new(Arc::new(initial)),
            subscribers: Subscribers::new(),
        }
    }

    /// Apply a partial update, producing a new snapshot, and notify
    /// synchronously.
    pub fn update(&self, patch: SlotStatePatch) {
        {
            let mut state = self.state.write();
            let mut next = (**state).clone();
            if let Some(badge) = patch.badge {
                next.badge = badge;
            }
            if let Some(visible) = patch.visible {
                next.visible = visible;
            }
            if let Some(panel) = patch.panel {
                next.panel = panel;
            }
            *state = Arc::new(next);
        }
        self.subscribers.notify(&());
    }

    /// Replace the whole state and notify synchronously.
    pub fn replace(&self, state: SlotState) {
        *self.state.write() = Arc::new(state);
        self.subscribers.notify(&());
    }

    /// Set the badge. Skips mutation and notification when the new value
    /// equals the current one, preventing redundant downstream refresh
    /// cascades.
    pub fn set_badge(&self, badge: Option<BadgeValue>) {
        {
            let mut state = self.state.write();
            if state.badge == badge {
                return;
            }
            let mut next = (**state).clone();
            next.badge = badge;
            *state = Arc::new(next);
        }
        self.subscribers.notify(&());
    }

    /// Set visibility; equality-gated like [`set_badge`].
    ///
    /// [`set_badge`]: SlotStateStore::set_badge
    pub fn set_visible(&self, visible: bool) {
        {
            let mut state = self.state.write();
            if state.visible == visible {
                return;
            }
            let mut next = (**state).clone();
            next.visible = visible;
            *state = Arc::new(next);
        }
        self.subscribers.notify(&());
    }
}

impl Default for SlotStateStore {
    fn default() -> Self {
        Self::new(SlotState::default())
    }
}

impl SlotObservable for SlotStateStore {
    fn state(&self) -> Arc<SlotState> {
        self.state.read().clone()
    }

    fn subscribe(&self, listener: SlotListener) -> SubscriberId {
        self.subscribers.add(move |_: &()| listener())
    }

    fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers.remove(id);
    }
}

/// Slot state derived from an external source, cached by version.
///
/// The version counter is bumped only when the source's own subscription
/// fires; `state()` recomputes only when the version differs from the
/// cached one and otherwise returns the identical cached reference.
pub struct DerivedSlotStore {
    source: Arc<dyn SlotSource>,
    version: AtomicU64,
    cache: Mutex<Option<(u64, Arc<SlotState>)>>,
    subscribers: Subscribers<()>,
    source_subscription: Mutex<Option<SubscriberId>>,
}

impl DerivedSlotStore {
    /// Wrap a source. The store subscribes to the source once; the
    /// forwarding subscription bumps the version and then notifies the
    /// store's own subscribers.
    pub fn new(source: Arc<dyn SlotSource>) -> Arc<Self> {
        let store = Arc::new(Self {
            source: source.clone(),
            version: AtomicU64::new(0),
            cache: Mutex::new(None),
            subscribers: Subscribers::new(),
            source_subscription: Mutex::new(None),
        });

        let weak: Weak<Self> = Arc::downgrade(&store);
        let subscription = source.subscribe(Arc::new(move || {
            if let Some(store) = weak.upgrade() {
                store.version.fetch_add(1, Ordering::SeqCst);
                store.subscribers.notify(&());
            }
        }));
        *store.source_subscription.lock() = Some(subscription);

        store
    }
}

impl SlotObservable for DerivedSlotStore {
    fn state(&self) -> Arc<SlotState> {
        let version = self.version.load(Ordering::SeqCst);
        let mut cache = self.cache.lock();
        match cache.as_ref() {
            Some((cached_version, state)) if *cached_version == version => state.clone(),
            _ => {
                let state = Arc::new(self.source.compute());
                *cache = Some((version, state.clone()));
                state
            }
        }
    }

    fn subscribe(&self, listener: SlotListener) -> SubscriberId {
        self.subscribers.add(move |_: &()| listener())
    }

    fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers.remove(id);
    }
}

impl Drop for DerivedSlotStore {
    fn drop(&mut self) {
        if let Some(subscription) = self.source_subscription.lock().take() {
            self.source.unsubscribe(subscription);
        }
    }
}

#[cfg(test)]
#[path = "slot_store_tests.rs"]
mod tests;
