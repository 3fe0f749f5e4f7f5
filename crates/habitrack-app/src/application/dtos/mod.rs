mod habit_dto;
mod streak_dto;

pub use habit_dto::{CompletionDto, HabitDto};
pub use streak_dto::HabitStreakDto;
