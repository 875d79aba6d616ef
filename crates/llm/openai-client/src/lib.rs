//! # OpenAI-compatible chat client
//!
//! Thin wrapper around [async-openai] for non-streaming chat completion. Works with any
//! endpoint speaking the OpenAI chat-completions protocol (OpenAI itself, Mistral, proxies)
//! by pointing the base URL at it. Provides token masking for safe logging.

use async_openai::{config::OpenAIConfig, types::CreateChatCompletionRequestArgs, Client};
use std::sync::Arc;

pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[len - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Chat client bound to one API key and base URL.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<OpenAIConfig>>,
    /// Stored only for masked logging.
    masked_key: String,
    base_url: String,
}

impl OpenAIClient {
    /// Builds a client for `base_url` (e.g. `https://api.openai.com/v1`).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let masked_key = mask_token(&api_key);
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url.clone());
        Self {
            client: Arc::new(Client::with_config(config)),
            masked_key,
            base_url,
        }
    }

    /// Sends a chat completion request and returns the first choice's content (untrimmed).
    ///
    /// Logs the masked API key and token usage; the request body is logged at debug level.
    /// Fails when the API returns an error or no choices.
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> anyhow::Result<String> {
        tracing::info!(
            model = %model,
            base_url = %self.base_url,
            message_count = messages.len(),
            api_key = %self.masked_key,
            "chat_completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .build()?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            if let Ok(json) = serde_json::to_string(&request) {
                tracing::debug!(request_json = %json, "chat_completion request JSON");
            }
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "chat_completion usage"
            );
        }

        match response.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content.unwrap_or_default()),
            None => anyhow::bail!("No choices in chat completion response"),
        }
    }
}
