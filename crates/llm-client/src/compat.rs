//! Request path shared by both variants: transcript → chat-completions request → trimmed reply.
//! Holds no state beyond one variant's own client and model.

use conversation::ChatMessage;
use openai_client::OpenAIClient;

use crate::chat_message_to_openai;
use crate::config::ProviderSettings;
use crate::error::ProviderError;
use crate::provider::ProviderKind;

#[derive(Clone)]
pub(crate) struct CompatChat {
    kind: ProviderKind,
    /// `None` when no API key is configured.
    client: Option<OpenAIClient>,
    model: String,
}

impl CompatChat {
    pub(crate) fn new(kind: ProviderKind, settings: ProviderSettings) -> Self {
        let client = settings
            .api_key
            .map(|key| OpenAIClient::with_base_url(key, settings.base_url));
        Self {
            kind,
            client,
            model: settings.model,
        }
    }

    pub(crate) fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub(crate) fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn has_api_key(&self) -> bool {
        self.client.is_some()
    }

    pub(crate) async fn complete(&self, transcript: &[ChatMessage]) -> Result<String, ProviderError> {
        let client = self.client.as_ref().ok_or_else(|| {
            ProviderError::new(
                self.kind,
                format!("API key not configured (set {}_API_KEY)", self.kind.env_prefix()),
            )
        })?;

        let messages = transcript
            .iter()
            .map(chat_message_to_openai)
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ProviderError::new(self.kind, format!("{:#}", e)))?;

        let reply = client
            .chat_completion(&self.model, messages)
            .await
            .map_err(|e| ProviderError::new(self.kind, format!("{:#}", e)))?;

        let reply = reply.trim();
        if reply.is_empty() {
            return Err(ProviderError::new(self.kind, "empty reply"));
        }
        Ok(reply.to_string())
    }
}
