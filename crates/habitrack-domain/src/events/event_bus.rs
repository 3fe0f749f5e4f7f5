//! Publishing side and handler side of the habit events.
//!
//! Command handlers publish `HabitCreated`, `HabitDeleted` and
//! `HabitCompleted` after their backend write succeeded. Subscribers (the
//! board refresh in the app crate) are registered per concrete event type and
//! stored type-erased, so one bus can route all three.

use async_trait::async_trait;
use std::any::{type_name, Any};
use std::marker::PhantomData;
use std::sync::Arc;

use super::DomainEvent;
use crate::shared::DomainError;

#[async_trait]
pub trait EventBus: Send + Sync {
    /// Deliver `event` to every handler subscribed to its concrete type
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError>;
}

/// Reaction to one kind of habit event
#[async_trait]
pub trait EventHandler<E: DomainEvent>: Send + Sync {
    async fn handle(&self, event: &E) -> Result<(), DomainError>;
}

/// What the bus stores: a handler that takes any event and checks the type itself
#[async_trait]
pub trait DynamicEventHandler: Send + Sync {
    async fn handle_dynamic(&self, event: &(dyn Any + Send + Sync)) -> Result<(), DomainError>;

    /// `type_name` of the accepted event; the bus routes on it
    fn event_type_name(&self) -> &'static str;
}

pub struct TypedEventHandlerWrapper<E: DomainEvent + 'static, H: EventHandler<E>> {
    handler: H,
    _event: PhantomData<fn(E)>,
}

impl<E: DomainEvent + 'static, H: EventHandler<E>> TypedEventHandlerWrapper<E, H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            _event: PhantomData,
        }
    }
}

/// Erase `handler` for `E`, ready for `subscribe::<E>`
pub fn typed_handler<E, H>(handler: H) -> Arc<dyn DynamicEventHandler>
where
    E: DomainEvent + 'static,
    H: EventHandler<E> + 'static,
{
    Arc::new(TypedEventHandlerWrapper::<E, H>::new(handler))
}

#[async_trait]
impl<E: DomainEvent + 'static, H: EventHandler<E>> DynamicEventHandler
    for TypedEventHandlerWrapper<E, H>
{
    async fn handle_dynamic(&self, event: &(dyn Any + Send + Sync)) -> Result<(), DomainError> {
        match event.downcast_ref::<E>() {
            Some(event) => self.handler.handle(event).await,
            None => Err(DomainError::Infrastructure(format!(
                "Handler for {} received another event type",
                type_name::<E>()
            ))),
        }
    }

    fn event_type_name(&self) -> &'static str {
        type_name::<E>()
    }
}
