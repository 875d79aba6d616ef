//! Secondary variant: MistralAI, via its OpenAI-compatible chat completions endpoint.

use async_trait::async_trait;
use conversation::ChatMessage;
use tracing::{info, instrument};

use crate::compat::CompatChat;
use crate::config::ProviderSettings;
use crate::error::ProviderError;
use crate::provider::ProviderKind;
use crate::LlmClient;

#[derive(Clone)]
pub struct MistralLlmClient {
    chat: CompatChat,
}

impl MistralLlmClient {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            chat: CompatChat::new(ProviderKind::MistralAi, settings),
        }
    }

    /// Client against api.mistral.ai with `mistral-large-latest`.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self::new(ProviderSettings::defaults(ProviderKind::MistralAi).with_api_key(api_key))
    }

    pub fn model(&self) -> &str {
        self.chat.model()
    }

    pub fn has_api_key(&self) -> bool {
        self.chat.has_api_key()
    }
}

#[async_trait]
impl LlmClient for MistralLlmClient {
    fn kind(&self) -> ProviderKind {
        self.chat.kind()
    }

    #[instrument(skip(self, transcript))]
    async fn generate_reply(&self, transcript: &[ChatMessage]) -> Result<String, ProviderError> {
        let reply = self.chat.complete(transcript).await?;
        info!(model = %self.chat.model(), reply_len = reply.len(), "MistralAI reply received");
        Ok(reply)
    }
}
