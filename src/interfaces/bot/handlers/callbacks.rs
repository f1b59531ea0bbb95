use teloxide::prelude::*;

use crate::interfaces::bot::utils::ActionId;

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Participation is acknowledged only; nothing is recorded.
pub async fn callback_handler(q: CallbackQuery, bot: Bot) -> HandlerResult {
    let data = q.data.clone().unwrap_or_default();
    log::info!("[CALLBACK] Data: '{}' from UserID: {}", data, q.from.id);

    let action = match data.parse::<ActionId>() {
        Ok(action) => action,
        Err(e) => {
            log::debug!("Ignoring callback: {}", e);
            return Ok(());
        }
    };

    bot.answer_callback_query(q.id)
        .text(action.acknowledgment())
        .await?;
    Ok(())
}
