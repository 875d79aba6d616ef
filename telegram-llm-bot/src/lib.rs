//! # telegram_llm_bot
//!
//! Telegram chat bot that relays each text message to the LLM provider selected for that chat
//! (OpenAI or MistralAI) and sends the reply back, keeping one conversation transcript per chat.
//!
//! **Public API:** [`run_bot_with_llm`] runs the bot; [`build_handler_chain`] builds the same
//! pipeline without polling so tests can drive it with core messages and a mock bot.

pub mod cli;
pub mod commands;
pub mod config;
mod facade;
pub mod handlers;
pub mod relay;
pub mod session;

pub use cli::{Cli, Commands};
pub use commands::{route, Command, Route};
pub use config::BotConfig;
pub use facade::{build_handler_chain, run_bot_with_llm};
pub use handlers::ConversationHandler;
pub use session::{Session, SessionDefaults, SessionStore};
