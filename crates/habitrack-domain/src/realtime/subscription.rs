use async_trait::async_trait;
use std::sync::Arc;

use super::event::{Channel, RealtimeEvent};
use crate::shared::DomainError;

/// Reaction to realtime events. Implementations must not assume ordering
/// relative to fetches they start.
#[async_trait]
pub trait RealtimeHandler: Send + Sync {
    async fn on_event(&self, event: RealtimeEvent);

    /// The feed lost its connection and opened a new one. Events sent while
    /// it was down are gone.
    async fn on_reconnect(&self) {}
}

/// Source of realtime events (the backend subscription API)
#[async_trait]
pub trait RealtimeFeed: Send + Sync {
    /// Start delivering events of `channel` to `handler` until the returned
    /// subscription is cancelled. A dropped connection is reopened in the
    /// background and reported through `on_reconnect`.
    async fn subscribe(
        &self,
        channel: Channel,
        handler: Arc<dyn RealtimeHandler>,
    ) -> Result<Subscription, DomainError>;
}

/// Handle of an active subscription. Dropping it cancels the subscription.
pub struct Subscription {
    channel: Channel,
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(channel: Channel, cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            channel,
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }

    /// Stop receiving events
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("channel", &self.channel)
            .field("active", &self.is_active())
            .finish()
    }
}
