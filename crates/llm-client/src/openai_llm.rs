//! Primary variant: OpenAI chat completions.

use async_trait::async_trait;
use conversation::ChatMessage;
use tracing::{info, instrument};

use crate::compat::CompatChat;
use crate::config::ProviderSettings;
use crate::error::ProviderError;
use crate::provider::ProviderKind;
use crate::LlmClient;

#[derive(Clone)]
pub struct OpenAILlmClient {
    chat: CompatChat,
}

impl OpenAILlmClient {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            chat: CompatChat::new(ProviderKind::OpenAi, settings),
        }
    }

    /// Client against api.openai.com with the default model.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self::new(ProviderSettings::defaults(ProviderKind::OpenAi).with_api_key(api_key))
    }

    pub fn model(&self) -> &str {
        self.chat.model()
    }

    pub fn has_api_key(&self) -> bool {
        self.chat.has_api_key()
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    fn kind(&self) -> ProviderKind {
        self.chat.kind()
    }

    #[instrument(skip(self, transcript))]
    async fn generate_reply(&self, transcript: &[ChatMessage]) -> Result<String, ProviderError> {
        let reply = self.chat.complete(transcript).await?;
        info!(model = %self.chat.model(), reply_len = reply.len(), "OpenAI reply received");
        Ok(reply)
    }
}
