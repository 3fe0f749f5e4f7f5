use serde::{Deserialize, Serialize};

use habitrack_domain::completion::HabitCompletion;
use habitrack_domain::habit::Habit;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub frequency: String,
    /// Cached counter stored on the habit; may lag behind the completion log
    pub streak_count: u32,
    pub created_at: String,
    pub last_completed: String,
}

impl From<&Habit> for HabitDto {
    fn from(habit: &Habit) -> Self {
        Self {
            id: habit.id().to_string(),
            title: habit.title().to_string(),
            description: habit.description().to_string(),
            frequency: habit.frequency().to_string(),
            streak_count: habit.streak_count(),
            created_at: habit.created_at().to_rfc3339(),
            last_completed: habit.last_completed().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionDto {
    pub id: String,
    pub habit_id: String,
    pub completed_at: String,
}

impl From<&HabitCompletion> for CompletionDto {
    fn from(completion: &HabitCompletion) -> Self {
        Self {
            id: completion.id().to_string(),
            habit_id: completion.habit_id().to_string(),
            completed_at: completion.completed_at().to_rfc3339(),
        }
    }
}
