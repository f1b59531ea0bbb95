use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::Client as ReqwestClient;
use teloxide::prelude::*;

mod application;
mod infrastructure;
mod interfaces;

use application::pricing::PriceFetcher;
use infrastructure::config::BotConfig;
use infrastructure::logging;
use interfaces::bot::Stores;
use interfaces::bot::core::ConversationRegistry;
use interfaces::bot::handlers::{
    callbacks::callback_handler,
    start::{Command, handle_commands},
    text::text_handler,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let config = BotConfig::from_env()?;
    match &config.solana_rpc_url {
        Some(url) => log::info!("Solana RPC endpoint configured as {}", url),
        None => log::info!("SOLANA_RPC_URL not set; rewards are recorded only"),
    }

    let stores = Arc::new(Stores::open(&config.data_dir).await?);
    log::info!("Data directory: {}", config.data_dir.display());
    log_collection_sizes(&stores).await;

    let http_client = ReqwestClient::builder()
        .tcp_keepalive(Duration::from_secs(60))
        .build()?;
    let price_fetcher = Arc::new(PriceFetcher::new(http_client, config.price_api_url.clone()));
    let registry = Arc::new(ConversationRegistry::new(config.conversation_timeout));

    let bot = Bot::new(config.bot_token.clone());

    let command_handler = Update::filter_message()
        .filter_command::<Command>()
        .endpoint(handle_commands);

    let text_message_handler = Update::filter_message().endpoint(text_handler);

    let callback_query_handler = Update::filter_callback_query().endpoint(callback_handler);

    let handler = dptree::entry()
        .branch(command_handler)
        .branch(text_message_handler)
        .branch(callback_query_handler);

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![stores, registry, price_fetcher])
        .enable_ctrlc_handler()
        .build();

    spawn_sigterm_handler(dispatcher.shutdown_token());

    log::info!("🤖 Bot is running...");
    dispatcher.dispatch().await;
    log::info!("Bot stopped");

    Ok(())
}

async fn log_collection_sizes(stores: &Stores) {
    match stores.tasks.load().await {
        Ok(tasks) => log::info!("Loaded {} tasks", tasks.len()),
        Err(e) => log::error!("Task collection unreadable: {}", e),
    }
    match stores.giveaways.load().await {
        Ok(giveaways) => log::info!("Loaded {} giveaways", giveaways.len()),
        Err(e) => log::error!("Giveaway collection unreadable: {}", e),
    }
}

#[cfg(unix)]
fn spawn_sigterm_handler(token: teloxide::dispatching::ShutdownToken) {
    use tokio::signal::unix::{SignalKind, signal};

    tokio::spawn(async move {
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                return;
            }
        };
        sigterm.recv().await;
        log::info!("SIGTERM received, shutting down");
        match token.shutdown() {
            Ok(shutdown) => shutdown.await,
            Err(e) => log::warn!("Dispatcher was not running: {}", e),
        }
    });
}

#[cfg(not(unix))]
fn spawn_sigterm_handler(_token: teloxide::dispatching::ShutdownToken) {}
