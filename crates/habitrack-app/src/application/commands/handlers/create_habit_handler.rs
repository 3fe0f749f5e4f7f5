use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::habit_commands::*;
use crate::application::dtos::HabitDto;
use habitrack_domain::events::habit_events::HabitCreated;
use habitrack_domain::events::EventBus;
use habitrack_domain::habit::{Frequency, Habit, HabitRepository};
use habitrack_domain::shared::DomainError;

/// Create habit command handler
pub struct CreateHabitCommandHandler {
    habit_repo: Arc<dyn HabitRepository>,
    event_bus: Arc<dyn EventBus>,
}

impl CreateHabitCommandHandler {
    pub fn new(habit_repo: Arc<dyn HabitRepository>, event_bus: Arc<dyn EventBus>) -> Self {
        Self {
            habit_repo,
            event_bus,
        }
    }
}

#[async_trait]
impl CommandHandler<CreateHabitCommand> for CreateHabitCommandHandler {
    type Result = CreateHabitResult;

    async fn handle(&self, cmd: CreateHabitCommand) -> Result<Self::Result, DomainError> {
        info!("Handling CreateHabitCommand for habit: {}", cmd.title);

        // validated before anything reaches the backend
        let frequency: Frequency = cmd.frequency.parse()?;
        let habit = Habit::new(cmd.user_id, cmd.title, cmd.description, frequency)?;

        self.habit_repo.create(&habit).await?;

        info!("Habit created: {} ({})", habit.title(), habit.id());

        let event = HabitCreated {
            habit_id: habit.id().clone(),
            user_id: habit.user_id().clone(),
            title: habit.title().to_string(),
            occurred_at: Utc::now(),
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(CreateHabitResult {
            habit: HabitDto::from(&habit),
        })
    }
}
