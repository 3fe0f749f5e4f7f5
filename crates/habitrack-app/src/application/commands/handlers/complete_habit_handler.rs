use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::habit_commands::*;
use habitrack_domain::completion::{CompletionRepository, HabitCompletion};
use habitrack_domain::events::habit_events::HabitCompleted;
use habitrack_domain::events::EventBus;
use habitrack_domain::habit::HabitRepository;
use habitrack_domain::shared::{DomainError, HabitId};

/// Records a completion, then refreshes the habit's cached counter.
///
/// The two writes are not atomic. The completion record is the ledger: if the
/// habit update fails afterwards the completion is kept and the result says so
/// through `streak_cache_updated`. Streak queries never read the cache.
pub struct CompleteHabitCommandHandler {
    habit_repo: Arc<dyn HabitRepository>,
    completion_repo: Arc<dyn CompletionRepository>,
    event_bus: Arc<dyn EventBus>,
}

impl CompleteHabitCommandHandler {
    pub fn new(
        habit_repo: Arc<dyn HabitRepository>,
        completion_repo: Arc<dyn CompletionRepository>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            habit_repo,
            completion_repo,
            event_bus,
        }
    }
}

#[async_trait]
impl CommandHandler<CompleteHabitCommand> for CompleteHabitCommandHandler {
    type Result = CompleteHabitResult;

    async fn handle(&self, cmd: CompleteHabitCommand) -> Result<Self::Result, DomainError> {
        info!("Handling CompleteHabitCommand for habit: {}", cmd.habit_id);

        let habit_id = HabitId::from_string(&cmd.habit_id);

        let mut habit = self
            .habit_repo
            .find_by_id(&habit_id)
            .await?
            .filter(|h| h.is_owned_by(&cmd.user_id))
            .ok_or_else(|| DomainError::HabitNotFound(cmd.habit_id.clone()))?;

        // 1. At most one completion per habit per day
        let today = self
            .completion_repo
            .list_by_user_since(&cmd.user_id, cmd.day_start)
            .await?;
        if today
            .iter()
            .any(|c| c.habit_id() == &habit_id && c.is_since(cmd.day_start))
        {
            return Err(DomainError::AlreadyCompletedToday(habit.title().to_string()));
        }

        // 2. Append to the ledger
        let completion =
            HabitCompletion::new(habit_id.clone(), cmd.user_id.clone(), cmd.completed_at);
        self.completion_repo.create(&completion).await?;

        // 3. Refresh the cache; failure leaves the completion in place
        let stored_streak_count = habit.streak_count();
        habit.record_completion(cmd.completed_at);
        let streak_cache_updated = match self.habit_repo.update(&habit).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "Completion {} stored but habit {} cache update failed: {}",
                    completion.id(),
                    habit_id,
                    e
                );
                false
            }
        };

        let streak_count = if streak_cache_updated {
            habit.streak_count()
        } else {
            stored_streak_count
        };

        info!(
            "Habit completed: {} ({}), cached streak {}",
            habit.title(),
            habit_id,
            streak_count
        );

        let event = HabitCompleted {
            habit_id: habit_id.clone(),
            completion_id: completion.id().clone(),
            user_id: cmd.user_id,
            completed_at: cmd.completed_at,
            streak_cache_updated,
            occurred_at: Utc::now(),
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(CompleteHabitResult {
            completion_id: completion.id().to_string(),
            habit_id: habit_id.to_string(),
            title: habit.title().to_string(),
            completed_at: cmd.completed_at.to_rfc3339(),
            streak_count,
            streak_cache_updated,
        })
    }
}
