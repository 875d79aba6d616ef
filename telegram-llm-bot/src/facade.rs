//! Assembly of the bot: tracing, Telegram bot, providers, session store, handler chain, polling.

use anyhow::Result;
use dbot_core::{init_tracing, Bot as CoreBot};
use dbot_telegram::{run_repl, TelegramBotAdapter};
use handler_chain::HandlerChain;
use llm_client::LlmProviders;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::BotConfig;
use crate::handlers::ConversationHandler;
use crate::session::SessionStore;

/// Builds the chain the runner feeds: a single [`ConversationHandler`] over a fresh session store.
/// `bot` receives every outbound message, so tests can pass a recording mock.
pub fn build_handler_chain(
    config: &BotConfig,
    bot: Arc<dyn CoreBot>,
    bot_username: Arc<RwLock<Option<String>>>,
    providers: LlmProviders,
) -> HandlerChain {
    let sessions = SessionStore::new(config.session.clone());
    let handler = ConversationHandler::new(
        sessions,
        providers,
        bot,
        bot_username,
        config.llm.request_timeout,
    );
    HandlerChain::new().add_handler(Arc::new(handler))
}

/// Runs the bot until polling stops. Load config with [`BotConfig::load`] before calling.
pub async fn run_bot_with_llm(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.telegram.log_file)?;

    info!(
        default_provider = %config.llm.default_provider,
        openai_model = %config.llm.openai.model,
        mistral_model = %config.llm.mistral.model,
        timeout_secs = config.llm.request_timeout.as_secs(),
        history_limit = config.session.history_limit,
        "Starting telegram-llm-bot"
    );

    let teloxide_bot = config.telegram.build_bot()?;
    let bot: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let bot_username = Arc::new(RwLock::new(None));
    let providers = LlmProviders::from_config(&config.llm);

    let chain = build_handler_chain(&config, bot, bot_username.clone(), providers);
    run_repl(teloxide_bot, chain, bot_username).await
}
