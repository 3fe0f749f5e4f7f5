// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod completion;
pub mod events;
pub mod habit;
pub mod realtime;
pub mod session;
pub mod shared;
pub mod streak;

// Re-exports for convenience
pub use events::DomainEvent;
pub use shared::{CompletionId, DomainError, HabitId, UserId};
