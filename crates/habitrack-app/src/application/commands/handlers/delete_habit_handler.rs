use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::habit_commands::*;
use habitrack_domain::events::habit_events::HabitDeleted;
use habitrack_domain::events::EventBus;
use habitrack_domain::habit::HabitRepository;
use habitrack_domain::shared::{DomainError, HabitId};

/// Delete habit command handler. Completions of the habit are left in place.
pub struct DeleteHabitCommandHandler {
    habit_repo: Arc<dyn HabitRepository>,
    event_bus: Arc<dyn EventBus>,
}

impl DeleteHabitCommandHandler {
    pub fn new(habit_repo: Arc<dyn HabitRepository>, event_bus: Arc<dyn EventBus>) -> Self {
        Self {
            habit_repo,
            event_bus,
        }
    }
}

#[async_trait]
impl CommandHandler<DeleteHabitCommand> for DeleteHabitCommandHandler {
    type Result = DeleteHabitResult;

    async fn handle(&self, cmd: DeleteHabitCommand) -> Result<Self::Result, DomainError> {
        info!("Handling DeleteHabitCommand for habit: {}", cmd.habit_id);

        let habit_id = HabitId::from_string(&cmd.habit_id);

        // someone else's habit is reported exactly like a missing one
        let habit = self
            .habit_repo
            .find_by_id(&habit_id)
            .await?
            .filter(|h| h.is_owned_by(&cmd.user_id))
            .ok_or_else(|| DomainError::HabitNotFound(cmd.habit_id.clone()))?;

        self.habit_repo.delete(habit.id()).await?;

        info!("Habit deleted: {} ({})", habit.title(), habit.id());

        let event = HabitDeleted {
            habit_id,
            user_id: cmd.user_id,
            occurred_at: Utc::now(),
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(())
    }
}
