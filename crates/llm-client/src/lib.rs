//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] capability ("produce a reply from a transcript") and its two
//! variants, [`OpenAILlmClient`] (primary) and [`MistralLlmClient`] (secondary). Both speak the
//! OpenAI-compatible chat-completions protocol through `openai-client`, each with its own
//! credential, base URL and model.
//!
//! [`LlmProviders`] holds one client per [`ProviderKind`] so the active provider can be switched
//! per conversation without rebuilding clients.

use async_trait::async_trait;
use conversation::{ChatMessage, MessageRole};
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

mod compat;
mod config;
mod error;
mod mistral_llm;
mod openai_llm;
mod provider;
mod providers;

pub use config::{EnvLlmConfig, ProviderSettings, DEFAULT_PROVIDER_TIMEOUT_SECS};
pub use error::ProviderError;
pub use mistral_llm::MistralLlmClient;
pub use openai_llm::OpenAILlmClient;
pub use provider::ProviderKind;
pub use providers::LlmProviders;

/// Provider Client capability.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Which variant this is; used for logging and error attribution.
    fn kind(&self) -> ProviderKind;

    /// Returns the whitespace-trimmed reply for the full transcript (system message first).
    /// Every failure (network, auth, quota, malformed response) is a [`ProviderError`].
    async fn generate_reply(&self, transcript: &[ChatMessage]) -> Result<String, ProviderError>;
}

/// Converts a single [`ChatMessage`] into the chat-completions request format.
fn chat_message_to_openai(msg: &ChatMessage) -> anyhow::Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}
