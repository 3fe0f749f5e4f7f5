use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::commands::command_handler::Command;
use crate::application::dtos::HabitDto;
use crate::application::utils::today_start;
use habitrack_domain::shared::UserId;

// ============================================================
// Create Habit Command
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHabitCommand {
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    /// `daily`, `weekly` or `monthly`
    pub frequency: String,
}

impl Command for CreateHabitCommand {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHabitResult {
    pub habit: HabitDto,
}

// ============================================================
// Delete Habit Command
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteHabitCommand {
    pub user_id: UserId,
    pub habit_id: String,
}

impl Command for DeleteHabitCommand {}

pub type DeleteHabitResult = ();

// ============================================================
// Complete Habit Command
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteHabitCommand {
    pub user_id: UserId,
    pub habit_id: String,
    pub completed_at: DateTime<Utc>,
    /// Completions at or after this instant count as "today"
    pub day_start: DateTime<Utc>,
}

impl CompleteHabitCommand {
    /// Complete now, with today starting at local midnight
    pub fn now(user_id: UserId, habit_id: impl Into<String>) -> Self {
        Self {
            user_id,
            habit_id: habit_id.into(),
            completed_at: Utc::now(),
            day_start: today_start(),
        }
    }
}

impl Command for CompleteHabitCommand {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteHabitResult {
    pub completion_id: String,
    pub habit_id: String,
    pub title: String,
    pub completed_at: String,
    /// Cached counter as stored on the backend after this command
    pub streak_count: u32,
    /// False when the completion was stored but the habit's cached fields were not
    pub streak_cache_updated: bool,
}
