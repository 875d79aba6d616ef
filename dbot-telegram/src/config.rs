//! Messaging-boundary config: bot token, optional Bot API URL, log file.
//! Loaded from BOT_TOKEN (or TELEGRAM_BOT_TOKEN), TELEGRAM_API_URL (or TELOXIDE_API_URL), LOG_FILE.

use dbot_core::{DbotError, Result};
use std::env;

/// Default tracing log file when LOG_FILE is unset.
pub const DEFAULT_LOG_FILE: &str = "logs/telegram-llm-bot.log";

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub log_file: String,
}

impl TelegramConfig {
    /// Loads from the environment. `token` overrides BOT_TOKEN; a missing or blank token is a
    /// config error (the bot cannot serve without it).
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let bot_token = token
            .or_else(|| env::var("BOT_TOKEN").ok())
            .or_else(|| env::var("TELEGRAM_BOT_TOKEN").ok())
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| DbotError::Config("BOT_TOKEN not set".to_string()))?;
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
        })
    }

    /// Builds a config from a token; other fields take their defaults.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            log_file: DEFAULT_LOG_FILE.to_string(),
        }
    }

    /// Checks that telegram_api_url, when set, is a valid URL.
    pub fn validate(&self) -> Result<()> {
        self.api_url().map(|_| ())
    }

    fn api_url(&self) -> Result<Option<reqwest::Url>> {
        self.telegram_api_url
            .as_deref()
            .map(|s| {
                reqwest::Url::parse(s).map_err(|_| {
                    DbotError::Config(format!(
                        "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                        s
                    ))
                })
            })
            .transpose()
    }

    /// Creates the teloxide Bot, pointed at telegram_api_url when set.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        Ok(match self.api_url()? {
            Some(url) => bot.set_api_url(url),
            None => bot,
        })
    }
}
