pub mod day;

pub use day::{day_start_in, today_start};
