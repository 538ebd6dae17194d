//! Timer capability.

use std::time::Duration;

/// Opaque handle to a pending timeout or interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// Timeout and interval scheduling with opaque handles.
pub trait Timers: Send + Sync {
    fn set_timeout(&self, callback: Box<dyn FnOnce() + Send>, delay: Duration) -> TimerHandle;

    fn clear_timeout(&self, handle: TimerHandle);

    fn set_interval(&self, callback: Box<dyn FnMut() + Send>, period: Duration) -> TimerHandle;

    fn clear_interval(&self, handle: TimerHandle);
}
