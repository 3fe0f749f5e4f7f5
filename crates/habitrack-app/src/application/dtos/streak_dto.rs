use serde::{Deserialize, Serialize};

use habitrack_domain::habit::Habit;
use habitrack_domain::streak::StreakData;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitStreakDto {
    pub habit_id: String,
    pub title: String,
    pub frequency: String,
    pub streak: u32,
    pub best_streak: u32,
    pub total_completed: u32,
}

impl HabitStreakDto {
    pub fn new(habit: &Habit, stats: StreakData) -> Self {
        Self {
            habit_id: habit.id().to_string(),
            title: habit.title().to_string(),
            frequency: habit.frequency().to_string(),
            streak: stats.streak,
            best_streak: stats.best_streak,
            total_completed: stats.total_completed,
        }
    }
}
