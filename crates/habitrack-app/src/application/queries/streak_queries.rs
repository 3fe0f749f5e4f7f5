use log::info;
use std::sync::Arc;

use crate::application::dtos::HabitStreakDto;
use habitrack_domain::completion::CompletionRepository;
use habitrack_domain::habit::HabitRepository;
use habitrack_domain::shared::{DomainError, HabitId, UserId};
use habitrack_domain::streak::{compute_streak, rank_by_best_streak};

/// Streak statistics recomputed from the full completion log on every call.
/// The cached `streak_count` of a habit is never read here.
pub struct StreakQueries {
    habit_repo: Arc<dyn HabitRepository>,
    completion_repo: Arc<dyn CompletionRepository>,
}

impl StreakQueries {
    pub fn new(
        habit_repo: Arc<dyn HabitRepository>,
        completion_repo: Arc<dyn CompletionRepository>,
    ) -> Self {
        Self {
            habit_repo,
            completion_repo,
        }
    }

    /// Streak statistics of one habit
    pub async fn get_streak(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
    ) -> Result<HabitStreakDto, DomainError> {
        let habit = self
            .habit_repo
            .find_by_id(habit_id)
            .await?
            .filter(|h| h.is_owned_by(user_id))
            .ok_or_else(|| DomainError::HabitNotFound(habit_id.to_string()))?;

        let completions = self.completion_repo.list_by_user(user_id).await?;
        let stats = compute_streak(habit.id(), &completions);

        info!(
            "[streak] habit_id={} current={} best={} total={}",
            habit_id, stats.streak, stats.best_streak, stats.total_completed
        );

        Ok(HabitStreakDto::new(&habit, stats))
    }

    /// Streak statistics of every habit, highest best streak first
    pub async fn get_ranked_streaks(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<HabitStreakDto>, DomainError> {
        let habits = self.habit_repo.list_by_user(user_id).await?;
        let completions = self.completion_repo.list_by_user(user_id).await?;

        let mut ranked: Vec<_> = habits
            .iter()
            .map(|habit| (habit, compute_streak(habit.id(), &completions)))
            .collect();
        rank_by_best_streak(&mut ranked, |(_, stats)| stats);

        info!(
            "[streak] ranked {} habits from {} completions",
            ranked.len(),
            completions.len()
        );

        Ok(ranked
            .into_iter()
            .map(|(habit, stats)| HabitStreakDto::new(habit, stats))
            .collect())
    }
}
