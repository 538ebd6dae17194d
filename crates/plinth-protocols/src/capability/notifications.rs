//! User notification capability.

/// A user-facing notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub title: String,
    pub body: Option<String>,
}

impl Notification {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Notification delivery, attributed to the emitting extension.
pub trait Notifications: Send + Sync {
    fn notify(&self, extension_id: &str, notification: Notification);
}
