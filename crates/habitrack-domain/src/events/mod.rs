use std::any::Any;

pub mod event_bus;
pub mod habit_events;

pub use event_bus::{
    typed_handler, DynamicEventHandler, EventBus, EventHandler, TypedEventHandlerWrapper,
};

/// Base trait for all domain events
pub trait DomainEvent: Send + Sync + Any {
    /// Convert to Any for type-safe downcasting
    fn as_any(&self) -> &(dyn Any + Send + Sync);

    fn event_type_name(&self) -> &'static str;
}
