mod habit_board;
mod realtime_sync;
mod session_service;

pub use habit_board::{HabitBoard, ListRefresher};
pub use realtime_sync::RealtimeListSync;
pub use session_service::AuthSession;
