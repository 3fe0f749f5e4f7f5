use async_trait::async_trait;
use log::{debug, error, info};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use habitrack_domain::events::{DomainEvent, DynamicEventHandler, EventBus};
use habitrack_domain::shared::DomainError;

/// In-process event bus. Handlers run one after another on the publisher's task.
pub struct InMemoryEventBus {
    handlers: Arc<RwLock<HashMap<&'static str, Vec<Arc<dyn DynamicEventHandler>>>>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Subscribe a handler to a specific event type
    pub async fn subscribe<E: DomainEvent + 'static>(
        &self,
        handler: Arc<dyn DynamicEventHandler>,
    ) -> Result<(), DomainError> {
        let event_type_name = std::any::type_name::<E>();
        if handler.event_type_name() != event_type_name {
            return Err(DomainError::Infrastructure(format!(
                "Handler for {} cannot subscribe to {}",
                handler.event_type_name(),
                event_type_name
            )));
        }

        self.handlers
            .write()
            .await
            .entry(event_type_name)
            .or_default()
            .push(handler);

        info!("Subscribed handler for event type: {}", event_type_name);
        Ok(())
    }

    /// Get the number of handlers for a specific event type
    pub async fn handler_count<E: DomainEvent + 'static>(&self) -> usize {
        let handlers = self.handlers.read().await;
        handlers
            .get(std::any::type_name::<E>())
            .map_or(0, |h| h.len())
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError> {
        let event_type_name = event.event_type_name();
        debug!("Publishing event: {}", event_type_name);

        // clone the list so handlers may publish or subscribe themselves
        let event_handlers = match self.handlers.read().await.get(event_type_name) {
            Some(list) => list.clone(),
            None => {
                debug!("No handlers registered for event type: {}", event_type_name);
                return Ok(());
            }
        };

        for handler in event_handlers {
            // a failing handler never fails the publisher
            if let Err(e) = handler.handle_dynamic(event.as_any()).await {
                error!("Handler failed to process event {}: {}", event_type_name, e);
            }
        }

        Ok(())
    }
}
