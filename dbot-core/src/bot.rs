//! Bot abstraction for relaying text back to a chat.
//!
//! [`Bot`] is transport-agnostic; dbot-telegram implements it over teloxide and tests
//! substitute recording mocks.

use crate::error::{DbotError, Result};
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Outbound side of the messaging boundary.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends `text` as a reply to `message` (same chat, quoting the original).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
}

/// Parses a transport message id string into an i32 (Telegram message ids are i32).
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| DbotError::Bot(format!("Invalid message_id: {}", s)))
}
