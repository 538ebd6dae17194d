//! Host logging capability.

use crate::types::Metadata;

/// Log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Leveled logger the host exposes to extensions.
pub trait HostLogger: Send + Sync {
    fn log(&self, level: LogLevel, message: &str, metadata: Option<&Metadata>);

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, None);
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, None);
    }

    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, None);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, None);
    }
}
