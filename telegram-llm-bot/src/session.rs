//! Per-chat conversation state: one [`Session`] (transcript + selected provider) per chat id.
//!
//! A session sits behind its own `tokio::sync::Mutex`; the turn handler holds that lock for the
//! whole turn, so turns in one chat are serialized while different chats proceed concurrently.

use anyhow::{Context as _, Result};
use conversation::{ChatMessage, ConversationContext, DEFAULT_SYSTEM_PROMPT};
use llm_client::ProviderKind;
use std::collections::HashMap;
use std::env;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Settings every new session starts from.
#[derive(Debug, Clone)]
pub struct SessionDefaults {
    pub provider: ProviderKind,
    pub system_prompt: String,
    /// Max non-system messages kept per transcript; 0 keeps everything.
    pub history_limit: usize,
}

impl SessionDefaults {
    /// Reads LLM_SYSTEM_PROMPT (or SYSTEM_PROMPT) and HISTORY_LIMIT. The provider comes from the
    /// LLM config, so it is passed in.
    pub fn from_env(provider: ProviderKind) -> Result<Self> {
        let system_prompt = env::var("LLM_SYSTEM_PROMPT")
            .or_else(|_| env::var("SYSTEM_PROMPT"))
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());
        let history_limit = match env::var("HISTORY_LIMIT") {
            Ok(s) if !s.trim().is_empty() => s
                .trim()
                .parse::<usize>()
                .context("HISTORY_LIMIT must be a non-negative whole number")?,
            _ => 0,
        };
        Ok(Self {
            provider,
            system_prompt,
            history_limit,
        })
    }
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            provider: ProviderKind::MistralAi,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            history_limit: 0,
        }
    }
}

/// Conversation state of one chat.
#[derive(Debug, Clone)]
pub struct Session {
    pub context: ConversationContext,
    pub provider: ProviderKind,
}

impl Session {
    pub fn new(defaults: &SessionDefaults) -> Self {
        Self {
            context: ConversationContext::new(defaults.system_prompt.clone())
                .with_history_limit(defaults.history_limit),
            provider: defaults.provider,
        }
    }
}

/// Chat id to session map. Cheap to clone; clones share the same sessions.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<i64, Arc<Mutex<Session>>>>>,
    defaults: Arc<SessionDefaults>,
}

impl SessionStore {
    pub fn new(defaults: SessionDefaults) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            defaults: Arc::new(defaults),
        }
    }

    /// Session for `chat_id`, created from the defaults on first contact.
    pub async fn get_or_create(&self, chat_id: i64) -> Arc<Mutex<Session>> {
        if let Some(session) = self.sessions.read().await.get(&chat_id) {
            return session.clone();
        }
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(chat_id)
            .or_insert_with(|| Arc::new(Mutex::new(Session::new(&self.defaults))))
            .clone()
    }

    /// Existing session for `chat_id`, without creating one.
    pub async fn get(&self, chat_id: i64) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(&chat_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Copy of the chat's transcript; `None` when the chat has no session yet.
    pub async fn transcript(&self, chat_id: i64) -> Option<Vec<ChatMessage>> {
        let session = self.get(chat_id).await?;
        let guard = session.lock().await;
        Some(guard.context.snapshot())
    }

    /// Provider the chat would use for its next turn.
    pub async fn provider(&self, chat_id: i64) -> ProviderKind {
        match self.get(chat_id).await {
            Some(session) => session.lock().await.provider,
            None => self.defaults.provider,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conversation::MessageRole;
    use serial_test::serial;

    #[tokio::test]
    async fn test_new_session_starts_from_defaults() {
        let store = SessionStore::new(SessionDefaults {
            provider: ProviderKind::OpenAi,
            system_prompt: "Be brief.".to_string(),
            history_limit: 0,
        });
        let session = store.get_or_create(1).await;
        let guard = session.lock().await;
        assert_eq!(guard.provider, ProviderKind::OpenAi);
        assert_eq!(guard.context.len(), 1);
        assert_eq!(guard.context.messages()[0].role, MessageRole::System);
        assert_eq!(guard.context.messages()[0].content, "Be brief.");
    }

    #[tokio::test]
    async fn test_get_or_create_returns_same_session() {
        let store = SessionStore::new(SessionDefaults::default());
        let a = store.get_or_create(7).await;
        let b = store.get_or_create(7).await;
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_chats_are_isolated() {
        let store = SessionStore::new(SessionDefaults::default());
        {
            let session = store.get_or_create(1).await;
            let mut guard = session.lock().await;
            guard.context.push_user("hi");
            guard.provider = ProviderKind::OpenAi;
        }
        assert_eq!(store.transcript(1).await.map(|t| t.len()), Some(2));
        assert_eq!(store.provider(1).await, ProviderKind::OpenAi);
        assert!(store.transcript(2).await.is_none());
        assert_eq!(store.provider(2).await, ProviderKind::MistralAi);
    }

    fn clear_env() {
        for key in ["LLM_SYSTEM_PROMPT", "SYSTEM_PROMPT", "HISTORY_LIMIT"] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_from_env_fallbacks() {
        clear_env();
        let defaults = SessionDefaults::from_env(ProviderKind::MistralAi).unwrap();
        assert_eq!(defaults.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(defaults.history_limit, 0);
        assert_eq!(defaults.provider, ProviderKind::MistralAi);
    }

    #[test]
    #[serial]
    fn test_defaults_from_env_values() {
        clear_env();
        env::set_var("SYSTEM_PROMPT", "legacy prompt");
        env::set_var("HISTORY_LIMIT", "20");
        let defaults = SessionDefaults::from_env(ProviderKind::OpenAi).unwrap();
        assert_eq!(defaults.system_prompt, "legacy prompt");
        assert_eq!(defaults.history_limit, 20);

        env::set_var("LLM_SYSTEM_PROMPT", "primary prompt");
        let defaults = SessionDefaults::from_env(ProviderKind::OpenAi).unwrap();
        assert_eq!(defaults.system_prompt, "primary prompt");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_history_limit_is_error() {
        clear_env();
        env::set_var("HISTORY_LIMIT", "lots");
        assert!(SessionDefaults::from_env(ProviderKind::OpenAi).is_err());
        clear_env();
    }
}
