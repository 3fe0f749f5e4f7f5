use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::instrument;

use crate::application::dtos::{CompletionDto, HabitDto};
use habitrack_domain::completion::CompletionRepository;
use habitrack_domain::habit::HabitRepository;
use habitrack_domain::shared::{DomainError, UserId};

pub struct HabitQueries {
    habit_repo: Arc<dyn HabitRepository>,
    completion_repo: Arc<dyn CompletionRepository>,
}

impl HabitQueries {
    pub fn new(
        habit_repo: Arc<dyn HabitRepository>,
        completion_repo: Arc<dyn CompletionRepository>,
    ) -> Self {
        Self {
            habit_repo,
            completion_repo,
        }
    }

    /// All habits of the user, oldest first
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn list_habits(&self, user_id: &UserId) -> Result<Vec<HabitDto>, DomainError> {
        let habits = self.habit_repo.list_by_user(user_id).await?;
        Ok(habits.iter().map(HabitDto::from).collect())
    }

    /// Completions recorded at or after `day_start`
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn list_today_completions(
        &self,
        user_id: &UserId,
        day_start: DateTime<Utc>,
    ) -> Result<Vec<CompletionDto>, DomainError> {
        let completions = self
            .completion_repo
            .list_by_user_since(user_id, day_start)
            .await?;

        Ok(completions
            .iter()
            .filter(|c| c.is_since(day_start))
            .map(CompletionDto::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::*;
    use chrono::Duration;
    use habitrack_domain::completion::HabitCompletion;

    #[tokio::test]
    async fn test_list_habits_only_returns_own_habits() {
        let ada = UserId::from_string("ada");
        let habit_repo = Arc::new(MockHabitRepository::new());
        habit_repo.insert(habit(&ada, "Read")).await;
        habit_repo.insert(habit(&UserId::from_string("grace"), "Run")).await;

        let queries = HabitQueries::new(habit_repo, Arc::new(MockCompletionRepository::new()));
        let habits = queries.list_habits(&ada).await.unwrap();

        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].title, "Read");
    }

    #[tokio::test]
    async fn test_today_completions_start_at_day_start() {
        let ada = UserId::from_string("ada");
        let completion_repo = Arc::new(MockCompletionRepository::new());
        let habit_id = habitrack_domain::shared::HabitId::from_string("h1");
        let day_start = at_day(1) - Duration::hours(7);

        for at in [at_day(0), day_start, at_day(1)] {
            completion_repo
                .insert(HabitCompletion::new(habit_id.clone(), ada.clone(), at))
                .await;
        }

        let queries = HabitQueries::new(Arc::new(MockHabitRepository::new()), completion_repo);
        let today = queries.list_today_completions(&ada, day_start).await.unwrap();

        assert_eq!(today.len(), 2);
        assert!(today.iter().all(|c| c.habit_id == "h1"));
    }
}
