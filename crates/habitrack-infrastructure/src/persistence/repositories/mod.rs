pub mod completion_repo;
pub mod habit_repo;

pub use completion_repo::AppwriteCompletionRepository;
pub use habit_repo::AppwriteHabitRepository;
