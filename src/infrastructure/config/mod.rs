use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};

use crate::application::pricing::config::COINGECKO_PRICE_API;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_CONVERSATION_TIMEOUT_SECS: u64 = 300;

#[derive(Clone, Debug)]
pub struct BotConfig {
    pub bot_token: String,
    pub solana_rpc_url: Option<String>,
    pub data_dir: PathBuf,
    pub price_api_url: String,
    pub conversation_timeout: Duration,
}

impl BotConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bot_token = non_empty("BOT_TOKEN")
            .or_else(|| non_empty("TELOXIDE_TOKEN"))
            .ok_or_else(|| anyhow!("BOT_TOKEN must be set"))?;

        let conversation_timeout = match non_empty("CONVERSATION_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .with_context(|| format!("CONVERSATION_TIMEOUT_SECS is not an integer: {raw}"))?;
                if secs == 0 {
                    return Err(anyhow!("CONVERSATION_TIMEOUT_SECS must be greater than zero"));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_CONVERSATION_TIMEOUT_SECS),
        };

        Ok(Self {
            bot_token,
            solana_rpc_url: non_empty("SOLANA_RPC_URL"),
            data_dir: non_empty("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            price_api_url: non_empty("PRICE_API_URL")
                .unwrap_or_else(|| COINGECKO_PRICE_API.to_string()),
            conversation_timeout,
        })
    }
}
