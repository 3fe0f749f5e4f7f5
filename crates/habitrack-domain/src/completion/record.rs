use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{CompletionId, HabitId, UserId};

/// One instance of a habit being done. Append-only: never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitCompletion {
    id: CompletionId,
    habit_id: HabitId,
    user_id: UserId,
    completed_at: DateTime<Utc>,
}

impl HabitCompletion {
    pub fn new(habit_id: HabitId, user_id: UserId, completed_at: DateTime<Utc>) -> Self {
        Self {
            id: CompletionId::new(),
            habit_id,
            user_id,
            completed_at,
        }
    }

    pub fn restore(
        id: CompletionId,
        habit_id: HabitId,
        user_id: UserId,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            habit_id,
            user_id,
            completed_at,
        }
    }

    pub fn id(&self) -> &CompletionId {
        &self.id
    }

    pub fn habit_id(&self) -> &HabitId {
        &self.habit_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// True when the completion happened at or after `instant`
    pub fn is_since(&self, instant: DateTime<Utc>) -> bool {
        self.completed_at >= instant
    }
}
