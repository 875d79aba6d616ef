//! Full bot configuration: messaging boundary, LLM providers, and per-chat session defaults.

use anyhow::Result;
use dbot_telegram::TelegramConfig;
use llm_client::EnvLlmConfig;

use crate::session::SessionDefaults;

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    pub llm: EnvLlmConfig,
    pub session: SessionDefaults,
}

impl BotConfig {
    /// Loads everything from the environment; `token` overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::from_env(token)?;
        let llm = EnvLlmConfig::from_env()?;
        let session = SessionDefaults::from_env(llm.default_provider)?;
        Ok(Self {
            telegram,
            llm,
            session,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()?;
        Ok(())
    }
}
