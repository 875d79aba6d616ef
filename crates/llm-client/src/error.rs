use crate::provider::ProviderKind;
use std::time::Duration;
use thiserror::Error;

/// Any failure producing a reply. Causes are not distinguished structurally; `message`
/// carries the upstream error chain for logs only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{provider} request failed: {message}")]
pub struct ProviderError {
    pub provider: ProviderKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(provider: ProviderKind, message: impl Into<String>) -> Self {
        Self {
            provider,
            message: message.into(),
        }
    }

    /// The call did not finish within `after`.
    pub fn timeout(provider: ProviderKind, after: Duration) -> Self {
        Self::new(provider, format!("timed out after {}s", after.as_secs_f32()))
    }
}
