//! Inter-process bridge capability.

/// Listener invoked for each payload published on a channel.
pub type IpcListener = Box<dyn Fn(&serde_json::Value) + Send + Sync>;

/// Subscription guard; dropping or calling [`unsubscribe`] detaches the
/// listener.
///
/// [`unsubscribe`]: IpcSubscription::unsubscribe
pub struct IpcSubscription {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl IpcSubscription {
    pub fn new(detach: impl FnOnce() + Send + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for IpcSubscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

/// Publish/subscribe bridge to other processes.
pub trait IpcBridge: Send + Sync {
    fn publish(&self, channel: &str, payload: serde_json::Value);

    fn subscribe(&self, channel: &str, listener: IpcListener) -> IpcSubscription;
}
