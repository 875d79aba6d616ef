//! Shared test doubles: a recording [`Bot`](dbot_core::Bot) and a scripted [`LlmClient`].
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use conversation::ChatMessage;
use dbot_core::{Bot as CoreBot, Chat, DbotError, Message, Result as DbotResult, User};
use llm_client::{LlmClient, LlmProviders, ProviderError, ProviderKind};
use telegram_llm_bot::{ConversationHandler, SessionDefaults, SessionStore};
use tokio::sync::{Barrier, RwLock};

pub const BOT_USERNAME: &str = "relay_bot";

/// How a message left the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Send { chat_id: i64, text: String },
    Reply { chat_id: i64, message_id: String, text: String },
}

impl Outbound {
    pub fn text(&self) -> &str {
        match self {
            Outbound::Send { text, .. } | Outbound::Reply { text, .. } => text,
        }
    }
}

/// Records every accepted outbound message; never touches the network.
#[derive(Default)]
pub struct MockBot {
    pub sent: Mutex<Vec<Outbound>>,
    /// `send_message` fails for texts longer than this, as Telegram does past 4096 characters.
    max_send_chars: Option<usize>,
    /// `send_message` always fails; `reply_to` still works.
    reject_sends: bool,
}

impl MockBot {
    pub fn rejecting_longer_than(max_chars: usize) -> Self {
        Self {
            max_send_chars: Some(max_chars),
            ..Self::default()
        }
    }

    pub fn rejecting_sends() -> Self {
        Self {
            reject_sends: true,
            ..Self::default()
        }
    }

    pub fn outbound(&self) -> Vec<Outbound> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Outbound> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CoreBot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> DbotResult<()> {
        if self.reject_sends {
            return Err(DbotError::Bot("Forbidden: bot was blocked by the user".to_string()));
        }
        if let Some(max) = self.max_send_chars {
            if text.chars().count() > max {
                return Err(DbotError::Bot("Bad Request: message is too long".to_string()));
            }
        }
        self.sent.lock().unwrap().push(Outbound::Send {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> DbotResult<()> {
        self.sent.lock().unwrap().push(Outbound::Reply {
            chat_id: message.chat.id,
            message_id: message.id.clone(),
            text: text.to_string(),
        });
        Ok(())
    }
}

/// LLM double. Scripted outcomes are consumed first; afterwards it answers
/// `"<kind>: <last user message>"`. Every transcript it receives is recorded.
pub struct ScriptedLlm {
    kind: ProviderKind,
    script: Mutex<VecDeque<std::result::Result<String, String>>>,
    delay: Option<Duration>,
    barrier: Option<Arc<Barrier>>,
    pub calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedLlm {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            script: Mutex::new(VecDeque::new()),
            delay: None,
            barrier: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn reply(self, text: &str) -> Self {
        self.script.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self, reason: &str) -> Self {
        self.script.lock().unwrap().push_back(Err(reason.to_string()));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every call waits on `barrier` before answering.
    pub fn with_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn generate_reply(
        &self,
        transcript: &[ChatMessage],
    ) -> std::result::Result<String, ProviderError> {
        self.calls.lock().unwrap().push(transcript.to_vec());
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let scripted = self.script.lock().unwrap().pop_front();
        match scripted {
            Some(Ok(text)) => Ok(text.trim().to_string()),
            Some(Err(reason)) => Err(ProviderError::new(self.kind, reason)),
            None => {
                let last = transcript.last().map(|m| m.content.as_str()).unwrap_or("");
                Ok(format!("{}: {}", self.kind.command(), last))
            }
        }
    }
}

pub fn message_in(chat_id: i64, message_id: &str, content: &str) -> Message {
    Message {
        id: message_id.to_string(),
        user: User {
            id: 1000 + chat_id,
            username: Some("alice".to_string()),
            first_name: Some("Alice".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: chat_id,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        created_at: Utc::now(),
    }
}

pub fn message(content: &str) -> Message {
    message_in(42, "1", content)
}

/// Handler plus handles to everything it talks to.
pub struct Harness {
    pub handler: ConversationHandler,
    pub sessions: SessionStore,
    pub bot: Arc<MockBot>,
    pub openai: Arc<ScriptedLlm>,
    pub mistral: Arc<ScriptedLlm>,
}

pub fn harness_with(
    defaults: SessionDefaults,
    openai: ScriptedLlm,
    mistral: ScriptedLlm,
    timeout: Duration,
) -> Harness {
    harness_with_bot(defaults, MockBot::default(), openai, mistral, timeout)
}

pub fn harness_with_bot(
    defaults: SessionDefaults,
    bot: MockBot,
    openai: ScriptedLlm,
    mistral: ScriptedLlm,
    timeout: Duration,
) -> Harness {
    let sessions = SessionStore::new(defaults);
    let bot = Arc::new(bot);
    let openai = Arc::new(openai);
    let mistral = Arc::new(mistral);
    let providers = LlmProviders::new(openai.clone(), mistral.clone());
    let handler = ConversationHandler::new(
        sessions.clone(),
        providers,
        bot.clone(),
        Arc::new(RwLock::new(Some(BOT_USERNAME.to_string()))),
        timeout,
    );
    Harness {
        handler,
        sessions,
        bot,
        openai,
        mistral,
    }
}

/// Default session settings (MistralAI, built-in prompt, no cap) and a 5s timeout.
pub fn harness(openai: ScriptedLlm, mistral: ScriptedLlm) -> Harness {
    harness_with(
        SessionDefaults::default(),
        openai,
        mistral,
        Duration::from_secs(5),
    )
}
