//! Provider configuration loaded from environment variables.

use anyhow::{Context, Result};
use openai_client::mask_token;
use std::env;
use std::fmt;
use std::time::Duration;

use crate::provider::ProviderKind;

/// Default bound on a single provider call.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 60;

/// Credential, endpoint and model of one provider.
#[derive(Clone)]
pub struct ProviderSettings {
    /// `None` is accepted at startup; the first request then fails with a ProviderError.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl ProviderSettings {
    /// Built-in base URL and model for `kind`, no credential.
    pub fn defaults(kind: ProviderKind) -> Self {
        Self {
            api_key: None,
            base_url: kind.default_base_url().to_string(),
            model: kind.default_model().to_string(),
        }
    }

    /// Reads `{PREFIX}_API_KEY`, `{PREFIX}_BASE_URL`, `{PREFIX}_MODEL` (e.g. `MISTRAL_MODEL`).
    /// Blank values count as unset.
    pub fn from_env(kind: ProviderKind) -> Self {
        let var = |suffix: &str| {
            env::var(format!("{}_{}", kind.env_prefix(), suffix))
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let defaults = Self::defaults(kind);
        Self {
            api_key: var("API_KEY"),
            base_url: var("BASE_URL").unwrap_or(defaults.base_url),
            model: var("MODEL").unwrap_or(defaults.model),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_deref().map(mask_token))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

/// Settings for every provider plus selection and timeout policy.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub openai: ProviderSettings,
    pub mistral: ProviderSettings,
    /// Provider active in a new conversation (`DEFAULT_PROVIDER`, default `mistralai`).
    pub default_provider: ProviderKind,
    /// Bound on each provider call (`PROVIDER_TIMEOUT_SECS`).
    pub request_timeout: Duration,
}

impl EnvLlmConfig {
    /// Load from environment variables. Missing API keys are not an error here.
    pub fn from_env() -> Result<Self> {
        let default_provider = match env::var("DEFAULT_PROVIDER") {
            Ok(s) if !s.trim().is_empty() => s
                .parse::<ProviderKind>()
                .map_err(anyhow::Error::msg)
                .context("DEFAULT_PROVIDER must be `openai` or `mistralai`")?,
            _ => ProviderKind::MistralAi,
        };
        let timeout_secs = match env::var("PROVIDER_TIMEOUT_SECS") {
            Ok(s) => s
                .trim()
                .parse::<u64>()
                .context("PROVIDER_TIMEOUT_SECS must be a whole number of seconds")?,
            Err(_) => DEFAULT_PROVIDER_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            anyhow::bail!("PROVIDER_TIMEOUT_SECS must be greater than 0");
        }
        Ok(Self {
            openai: ProviderSettings::from_env(ProviderKind::OpenAi),
            mistral: ProviderSettings::from_env(ProviderKind::MistralAi),
            default_provider,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn settings(&self, kind: ProviderKind) -> &ProviderSettings {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::MistralAi => &self.mistral,
        }
    }
}

impl Default for EnvLlmConfig {
    fn default() -> Self {
        Self {
            openai: ProviderSettings::defaults(ProviderKind::OpenAi),
            mistral: ProviderSettings::defaults(ProviderKind::MistralAi),
            default_provider: ProviderKind::MistralAi,
            request_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
        }
    }
}
