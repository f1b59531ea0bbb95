use crate::interfaces::bot::data::Poll;
use crate::interfaces::bot::utils::ActionId;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

pub fn participate_keyboard(action: ActionId) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "Participate",
        action.to_string(),
    )]])
}

/// One row, one button per option. No options gives an empty keyboard.
pub fn poll_keyboard(poll: &Poll) -> InlineKeyboardMarkup {
    if poll.options.is_empty() {
        return InlineKeyboardMarkup::default();
    }

    let row: Vec<InlineKeyboardButton> = poll
        .options
        .iter()
        .enumerate()
        .map(|(position, option)| {
            InlineKeyboardButton::callback(option.clone(), ActionId::PollVote(position).to_string())
        })
        .collect();
    InlineKeyboardMarkup::new(vec![row])
}
