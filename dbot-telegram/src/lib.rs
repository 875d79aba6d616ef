//! # dbot-telegram
//!
//! Telegram side of the messaging boundary: adapters from teloxide types to dbot-core types, a
//! [`dbot_core::Bot`] implementation, minimal config, and the polling runner. No conversation or
//! LLM logic lives here.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::TelegramConfig;
pub use runner::run_repl;
