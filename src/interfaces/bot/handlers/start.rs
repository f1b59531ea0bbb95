use std::sync::Arc;

use teloxide::types::{Me, ParseMode};
use teloxide::{prelude::*, utils::command::BotCommands};

use crate::application::pricing::PriceFetcher;
use crate::interfaces::bot::core::{ConversationKey, ConversationRegistry};
use crate::interfaces::bot::{CreationKind, FAQ_TEXT, HELP_TEXT, referral_text, welcome_text};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    #[command(description = "Welcome message and market update.")]
    Start(String),
    #[command(description = "List the bot commands.")]
    Help,
    #[command(description = "Create a new poll.")]
    CreatePoll,
    #[command(description = "Create a new task.")]
    CreateTask,
    #[command(description = "Host a giveaway.")]
    CreateGiveaway,
    #[command(description = "Generate your referral link.")]
    GetReferral,
    #[command(description = "Learn how to use the bot.")]
    Faq,
}

pub async fn handle_commands(
    bot: Bot,
    msg: Message,
    me: Me,
    cmd: Command,
    registry: Arc<ConversationRegistry>,
    price_fetcher: Arc<PriceFetcher>,
) -> HandlerResult {
    match cmd {
        Command::Start(payload) => start(bot, msg, payload, price_fetcher).await?,
        Command::Help => {
            bot.send_message(msg.chat.id, HELP_TEXT).await?;
        }
        Command::Faq => {
            bot.send_message(msg.chat.id, FAQ_TEXT).await?;
        }
        Command::GetReferral => get_referral(bot, msg, me).await?,
        Command::CreatePoll => begin_creation(bot, msg, registry, CreationKind::Poll).await?,
        Command::CreateTask => begin_creation(bot, msg, registry, CreationKind::Task).await?,
        Command::CreateGiveaway => {
            begin_creation(bot, msg, registry, CreationKind::Giveaway).await?
        }
    }
    Ok(())
}

pub async fn start(
    bot: Bot,
    msg: Message,
    payload: String,
    price_fetcher: Arc<PriceFetcher>,
) -> HandlerResult {
    let referrer = payload.trim();
    if !referrer.is_empty() {
        let user_display = msg
            .from()
            .map(|user| user.id.0.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        log::info!(
            "User {} started the bot via referral '{}'",
            user_display,
            referrer
        );
    }

    let prices = price_fetcher.fetch_prices().await;
    bot.send_message(msg.chat.id, welcome_text(&prices))
        .parse_mode(ParseMode::MarkdownV2)
        .await?;
    Ok(())
}

async fn get_referral(bot: Bot, msg: Message, me: Me) -> HandlerResult {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    bot.send_message(msg.chat.id, referral_text(me.username(), user.id.0))
        .await?;
    Ok(())
}

/// Sends the input prompt and waits for the caller's next message. The flow is
/// dropped, with a notice, once the registry timeout passes.
async fn begin_creation(
    bot: Bot,
    msg: Message,
    registry: Arc<ConversationRegistry>,
    kind: CreationKind,
) -> HandlerResult {
    let Some(user) = msg.from() else {
        log::debug!(
            "Ignoring /create{} without a sender in chat {}",
            kind.label(),
            msg.chat.id
        );
        return Ok(());
    };
    let key = ConversationKey::new(msg.chat.id.0, user.id.0);

    let session = registry.begin(key, kind);
    bot.send_message(msg.chat.id, kind.prompt_text()).await?;

    let timeout = registry.timeout();
    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        if registry.expire(&key, session).is_some() {
            log::info!(
                "{} creation for user {} in chat {} timed out",
                kind.label(),
                key.user_id,
                key.chat_id
            );
            if let Err(e) = bot
                .send_message(ChatId(key.chat_id), kind.timeout_text())
                .await
            {
                log::warn!("Failed to send timeout notice to {}: {}", key.chat_id, e);
            }
        }
    });

    Ok(())
}
