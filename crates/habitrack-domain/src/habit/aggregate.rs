use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::Frequency;
use crate::shared::{DomainError, HabitId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    id: HabitId,
    user_id: UserId,
    title: String,
    description: String,
    frequency: Frequency,
    streak_count: u32,
    created_at: DateTime<Utc>,
    last_completed: DateTime<Utc>,
}

impl Habit {
    pub fn new(
        user_id: UserId,
        title: String,
        description: String,
        frequency: Frequency,
    ) -> Result<Self, DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::Validation(
                "Habit title cannot be empty".to_string(),
            ));
        }

        if description.trim().is_empty() {
            return Err(DomainError::Validation(
                "Habit description cannot be empty".to_string(),
            ));
        }

        // A new habit counts as "last completed" at creation time
        let now = Utc::now();

        Ok(Self {
            id: HabitId::new(),
            user_id,
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            frequency,
            streak_count: 0,
            created_at: now,
            last_completed: now,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: HabitId,
        user_id: UserId,
        title: String,
        description: String,
        frequency: Frequency,
        streak_count: u32,
        created_at: DateTime<Utc>,
        last_completed: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            title,
            description,
            frequency,
            streak_count,
            created_at,
            last_completed,
        }
    }

    pub fn id(&self) -> &HabitId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Denormalized running counter. May drift from the completion log.
    pub fn streak_count(&self) -> u32 {
        self.streak_count
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_completed(&self) -> DateTime<Utc> {
        self.last_completed
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Bump the cached counter after a completion has been recorded
    pub fn record_completion(&mut self, completed_at: DateTime<Utc>) {
        self.streak_count = self.streak_count.saturating_add(1);
        self.last_completed = completed_at;
    }
}
