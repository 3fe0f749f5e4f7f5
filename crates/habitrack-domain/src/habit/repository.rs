use async_trait::async_trait;

use super::aggregate::Habit;
use crate::shared::{DomainError, HabitId, UserId};

#[async_trait]
pub trait HabitRepository: Send + Sync {
    /// Create a new habit document
    async fn create(&self, habit: &Habit) -> Result<(), DomainError>;

    /// Overwrite the mutable fields of an existing habit
    async fn update(&self, habit: &Habit) -> Result<(), DomainError>;

    async fn delete(&self, id: &HabitId) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &HabitId) -> Result<Option<Habit>, DomainError>;

    /// List every habit owned by a user
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Habit>, DomainError>;
}
