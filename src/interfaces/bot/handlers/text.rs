use std::sync::Arc;

use teloxide::prelude::*;

use crate::interfaces::bot::core::{ConversationKey, ConversationRegistry};
use crate::interfaces::bot::data::{
    Appended, Giveaway, JsonCollection, Poll, Record, Stores, Task,
};
use crate::interfaces::bot::utils::{
    ActionId, parse_giveaway_input, parse_poll_input, parse_task_input,
};
use crate::interfaces::bot::{
    CreationKind, giveaway_created_text, participate_keyboard, poll_keyboard, store_failure_text,
    task_created_text,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Result of feeding a reply into a creation flow, before anything is sent.
#[derive(Debug, Clone, PartialEq)]
pub enum CreationOutcome {
    Poll(Poll),
    Task(Task, Appended),
    Giveaway(Giveaway, Appended),
    Rejected(String),
    StoreFailed(&'static str),
}

/// Unrecognised commands (`/foo`, `/help@OtherBot`) are never creation input.
pub fn is_creation_reply(text: &str) -> bool {
    !text.trim_start().starts_with('/')
}

pub async fn text_handler(
    bot: Bot,
    msg: Message,
    registry: Arc<ConversationRegistry>,
    stores: Arc<Stores>,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let (Some(text), Some(user)) = (msg.text(), msg.from()) else {
        return Ok(());
    };

    if !is_creation_reply(text) {
        log::debug!("Ignoring unhandled command '{}' in chat {}", text, chat_id);
        return Ok(());
    }

    let key = ConversationKey::new(chat_id.0, user.id.0);
    let Some(kind) = registry.take(&key) else {
        log::debug!("No pending creation for user {} in chat {}", user.id, chat_id);
        return Ok(());
    };

    match complete_creation(kind, text, &stores).await {
        CreationOutcome::Poll(poll) => {
            log::info!(
                "Poll created in chat {} with {} options",
                chat_id,
                poll.options.len()
            );
            bot.send_message(chat_id, poll.question.clone())
                .reply_markup(poll_keyboard(&poll))
                .await?;
        }
        CreationOutcome::Task(task, appended) => {
            bot.send_message(chat_id, task_created_text(&task))
                .reply_markup(participate_keyboard(ActionId::TaskParticipate(appended.id)))
                .await?;
        }
        CreationOutcome::Giveaway(giveaway, appended) => {
            bot.send_message(chat_id, giveaway_created_text(&giveaway))
                .reply_markup(participate_keyboard(ActionId::GiveawayParticipate(
                    appended.id,
                )))
                .await?;
        }
        CreationOutcome::Rejected(reply) => {
            bot.send_message(chat_id, reply).await?;
        }
        CreationOutcome::StoreFailed(label) => {
            bot.send_message(chat_id, store_failure_text(label)).await?;
        }
    }

    Ok(())
}

/// Parses the reply for `kind`; tasks and giveaways are persisted, polls are not.
pub async fn complete_creation(kind: CreationKind, text: &str, stores: &Stores) -> CreationOutcome {
    match kind {
        CreationKind::Task => match parse_task_input(text) {
            Ok(task) => persist(&stores.tasks, task, kind, CreationOutcome::Task).await,
            Err(e) => CreationOutcome::Rejected(e.to_string()),
        },
        CreationKind::Giveaway => match parse_giveaway_input(text) {
            Ok(giveaway) => {
                persist(&stores.giveaways, giveaway, kind, CreationOutcome::Giveaway).await
            }
            Err(e) => CreationOutcome::Rejected(e.to_string()),
        },
        CreationKind::Poll => CreationOutcome::Poll(parse_poll_input(text)),
    }
}

async fn persist<T, F>(
    collection: &JsonCollection<T>,
    record: T,
    kind: CreationKind,
    done: F,
) -> CreationOutcome
where
    T: Record + Clone + serde::Serialize + serde::de::DeserializeOwned,
    F: FnOnce(T, Appended) -> CreationOutcome,
{
    match collection.append(record.clone()).await {
        Ok(appended) => {
            log::info!(
                "Stored {} #{} at index {} in {}",
                kind.label(),
                appended.id,
                appended.index,
                collection.path().display()
            );
            let mut stored = record;
            stored.assign_id(appended.id);
            done(stored, appended)
        }
        Err(e) => {
            log::error!("Failed to store {}: {}", kind.label(), e);
            CreationOutcome::StoreFailed(kind.label())
        }
    }
}
