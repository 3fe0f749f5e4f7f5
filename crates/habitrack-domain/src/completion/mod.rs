mod record;
mod repository;

pub use record::HabitCompletion;
pub use repository::CompletionRepository;
