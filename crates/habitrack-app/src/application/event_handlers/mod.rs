mod board_refresh_handler;

pub use board_refresh_handler::BoardRefreshEventHandler;
