mod complete_habit_handler;
mod create_habit_handler;
mod delete_habit_handler;

#[cfg(test)]
mod tests;

pub use complete_habit_handler::CompleteHabitCommandHandler;
pub use create_habit_handler::CreateHabitCommandHandler;
pub use delete_habit_handler::DeleteHabitCommandHandler;
