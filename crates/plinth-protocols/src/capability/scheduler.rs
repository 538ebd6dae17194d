//! Cooperative task scheduling capability.

use std::time::Duration;

/// Priority for scheduled work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum TaskPriority {
    Low,
    #[default]
    Normal,
    High,
}

/// Options for one scheduled task.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleOptions {
    pub delay: Option<Duration>,
    pub priority: TaskPriority,
}

/// Cooperative scheduler for lower-priority background work.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, task: Box<dyn FnOnce() + Send>, options: ScheduleOptions);
}
