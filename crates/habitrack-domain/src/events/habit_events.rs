use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::events::DomainEvent;
use crate::shared::{CompletionId, HabitId, UserId};

/// Macro to implement DomainEvent trait with type name
macro_rules! impl_domain_event {
    ($type:ty) => {
        impl DomainEvent for $type {
            fn as_any(&self) -> &(dyn Any + Send + Sync) {
                self
            }

            fn event_type_name(&self) -> &'static str {
                std::any::type_name::<Self>()
            }
        }
    };
}

/// Event fired when a habit is created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitCreated {
    pub habit_id: HabitId,
    pub user_id: UserId,
    pub title: String,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(HabitCreated);

/// Event fired when a habit is deleted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitDeleted {
    pub habit_id: HabitId,
    pub user_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(HabitDeleted);

/// Event fired when a completion is recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitCompleted {
    pub habit_id: HabitId,
    pub completion_id: CompletionId,
    pub user_id: UserId,
    pub completed_at: DateTime<Utc>,
    /// False when the habit's cached counter could not be written
    pub streak_cache_updated: bool,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(HabitCompleted);
