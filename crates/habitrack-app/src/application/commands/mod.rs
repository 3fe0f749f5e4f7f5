pub mod command_handler;
pub mod habit_commands;
pub mod handlers;

pub use command_handler::{Command, CommandHandler};
