pub mod actions;
pub mod input;

pub use actions::ActionId;
pub use input::{parse_giveaway_input, parse_poll_input, parse_task_input};
