use thiserror::Error;

use crate::interfaces::bot::data::{Giveaway, Poll, Task};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("❌ Invalid reward amount. Please try again.")]
    InvalidReward,
    #[error("❌ Invalid number of winners. Please try again.")]
    InvalidWinnerCount,
}

fn parse_reward(field: Option<&str>) -> Result<f64, InputError> {
    field
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|reward| reward.is_finite() && *reward >= 0.0)
        .ok_or(InputError::InvalidReward)
}

/// `Title, Description, Reward`. Title and description are kept verbatim.
pub fn parse_task_input(text: &str) -> Result<Task, InputError> {
    let mut fields = text.split(',');
    let title = fields.next().unwrap_or_default();
    let description = fields.next();
    let reward = parse_reward(fields.next())?;

    Ok(Task::new(title, description.unwrap_or_default(), reward))
}

/// `Title, Number of Winners, Reward per Winner`.
pub fn parse_giveaway_input(text: &str) -> Result<Giveaway, InputError> {
    let mut fields = text.split(',');
    let title = fields.next().unwrap_or_default();
    let winner_count = fields
        .next()
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|count| *count > 0)
        .ok_or(InputError::InvalidWinnerCount)?;
    let reward_per_winner = parse_reward(fields.next())?;

    Ok(Giveaway::new(title, winner_count, reward_per_winner))
}

pub fn parse_poll_input(text: &str) -> Poll {
    let mut fields = text.split(',');
    let question = fields.next().unwrap_or_default().to_string();
    let options = fields.map(|option| option.trim().to_string()).collect();

    Poll { question, options }
}
