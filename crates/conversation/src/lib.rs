//! # Conversation
//!
//! The transcript handed to an LLM on every turn: an ordered list of role-tagged
//! [`ChatMessage`]s that always starts with exactly one system instruction.
//!
//! ## External interactions
//!
//! - **LLM providers**: [`ConversationContext::snapshot`] is converted 1:1 into the
//!   chat-completions `messages` array by `llm-client`.

mod context;
mod message;

pub use context::{ConversationContext, DEFAULT_SYSTEM_PROMPT};
pub use message::{ChatMessage, MessageRole};
