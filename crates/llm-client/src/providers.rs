use std::sync::Arc;

use tracing::{info, warn};

use crate::config::EnvLlmConfig;
use crate::mistral_llm::MistralLlmClient;
use crate::openai_llm::OpenAILlmClient;
use crate::provider::ProviderKind;
use crate::LlmClient;

/// One ready client per [`ProviderKind`]. Cloning shares the clients.
#[derive(Clone)]
pub struct LlmProviders {
    openai: Arc<dyn LlmClient>,
    mistral: Arc<dyn LlmClient>,
}

impl LlmProviders {
    pub fn new(openai: Arc<dyn LlmClient>, mistral: Arc<dyn LlmClient>) -> Self {
        Self { openai, mistral }
    }

    /// Builds both variants. A missing API key only logs a warning; that provider fails on use.
    pub fn from_config(config: &EnvLlmConfig) -> Self {
        let openai = OpenAILlmClient::new(config.openai.clone());
        let mistral = MistralLlmClient::new(config.mistral.clone());
        for (kind, has_key, model) in [
            (ProviderKind::OpenAi, openai.has_api_key(), openai.model().to_string()),
            (ProviderKind::MistralAi, mistral.has_api_key(), mistral.model().to_string()),
        ] {
            if has_key {
                info!(provider = %kind, model = %model, "Provider configured");
            } else {
                warn!(
                    provider = %kind,
                    "No {}_API_KEY set; requests to this provider will fail",
                    kind.env_prefix()
                );
            }
        }
        Self::new(Arc::new(openai), Arc::new(mistral))
    }

    pub fn get(&self, kind: ProviderKind) -> Arc<dyn LlmClient> {
        match kind {
            ProviderKind::OpenAi => self.openai.clone(),
            ProviderKind::MistralAi => self.mistral.clone(),
        }
    }
}
