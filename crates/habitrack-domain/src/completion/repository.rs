use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::record::HabitCompletion;
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait CompletionRepository: Send + Sync {
    async fn create(&self, completion: &HabitCompletion) -> Result<(), DomainError>;

    /// Full completion log of a user, across all habits.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<HabitCompletion>, DomainError>;

    /// Completions of a user with `completed_at >= since`.
    async fn list_by_user_since(
        &self,
        user_id: &UserId,
        since: DateTime<Utc>,
    ) -> Result<Vec<HabitCompletion>, DomainError>;
}
