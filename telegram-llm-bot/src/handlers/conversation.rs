//! Conversation handler: answers bot commands and runs one LLM turn per free-text message.
//!
//! A turn is `Idle -> AwaitingProviderReply -> Idle`: the text is appended to the chat's context
//! as `user`, the whole transcript goes to the chat's provider, and the reply is appended as
//! `assistant` once it has been sent to the chat. When the provider fails (or times out), or the
//! reply cannot be delivered, the `user` entry stays, no `assistant` entry is added, and the chat
//! gets [`APOLOGY_TEXT`].

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, Chat, Handler, HandlerResponse, Message, Result};
use llm_client::{LlmProviders, ProviderError, ProviderKind};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};

use crate::commands::{
    help_text, provider_selected_text, route, Command, Route, APOLOGY_TEXT, CLEARED_TEXT,
    START_TEXT, UNKNOWN_COMMAND_TEXT,
};
use crate::relay::{split_message, MAX_MESSAGE_CHARS};
use crate::session::SessionStore;

#[derive(Clone)]
pub struct ConversationHandler {
    sessions: SessionStore,
    providers: LlmProviders,
    bot: Arc<dyn CoreBot>,
    /// Filled by the runner from `get_me`; used to match `/cmd@botname`.
    bot_username: Arc<RwLock<Option<String>>>,
    /// Bound on each provider call.
    request_timeout: Duration,
}

impl ConversationHandler {
    pub fn new(
        sessions: SessionStore,
        providers: LlmProviders,
        bot: Arc<dyn CoreBot>,
        bot_username: Arc<RwLock<Option<String>>>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            sessions,
            providers,
            bot,
            bot_username,
            request_timeout,
        }
    }

    async fn handle_command(&self, message: &Message, command: Command) -> Result<HandlerResponse> {
        let chat_id = message.chat.id;
        let text = match command {
            Command::Start => START_TEXT.to_string(),
            Command::Help => help_text(),
            Command::Clear => {
                let session = self.sessions.get_or_create(chat_id).await;
                session.lock().await.context.reset();
                info!(chat_id, "Conversation context cleared");
                CLEARED_TEXT.to_string()
            }
            Command::OpenAi => self.select_provider(chat_id, ProviderKind::OpenAi).await,
            Command::MistralAi => self.select_provider(chat_id, ProviderKind::MistralAi).await,
        };
        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Stop)
    }

    /// Switches the chat's provider; the transcript is left as is.
    async fn select_provider(&self, chat_id: i64, kind: ProviderKind) -> String {
        let session = self.sessions.get_or_create(chat_id).await;
        session.lock().await.provider = kind;
        info!(chat_id, provider = %kind, "Provider selected");
        provider_selected_text(kind)
    }

    /// Runs one turn for `text`. The session lock is held until the reply is sent and recorded.
    #[instrument(skip(self, message, text), fields(chat_id = message.chat.id))]
    async fn handle_turn(&self, message: &Message, text: &str) -> Result<HandlerResponse> {
        let handle = self.sessions.get_or_create(message.chat.id).await;
        let mut session = handle.lock().await;

        session.context.push_user(text);
        let transcript = session.context.snapshot();
        let kind = session.provider;
        let client = self.providers.get(kind);
        debug!(provider = %kind, messages = transcript.len(), "Submitting transcript");

        let outcome = match tokio::time::timeout(
            self.request_timeout,
            client.generate_reply(&transcript),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ProviderError::timeout(kind, self.request_timeout)),
        };

        let reply = match outcome {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, provider = %kind, user_id = message.user.id, "Provider failed");
                return self.send_apology(message).await;
            }
        };

        // The reply is recorded only once the chat has received all of it.
        if let Err(e) = self.relay(&message.chat, &reply).await {
            error!(error = %e, reply_len = reply.len(), "Failed to relay reply");
            return self.send_apology(message).await;
        }
        session.context.push_assistant(reply.clone());
        info!(
            provider = %kind,
            user_id = message.user.id,
            reply_len = reply.len(),
            "Turn completed"
        );
        Ok(HandlerResponse::Reply(reply))
    }

    /// Sends `text` to the chat, split into pieces Telegram accepts.
    async fn relay(&self, chat: &Chat, text: &str) -> Result<()> {
        for chunk in split_message(text, MAX_MESSAGE_CHARS) {
            self.bot.send_message(chat, &chunk).await?;
        }
        Ok(())
    }

    async fn send_apology(&self, message: &Message) -> Result<HandlerResponse> {
        self.bot.reply_to(message, APOLOGY_TEXT).await?;
        Ok(HandlerResponse::Reply(APOLOGY_TEXT.to_string()))
    }
}

#[async_trait]
impl Handler for ConversationHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.content.trim().is_empty() {
            return Ok(HandlerResponse::Continue);
        }

        let bot_username = self.bot_username.read().await.clone();
        match route(&message.content, bot_username.as_deref()) {
            Route::Command(command) => self.handle_command(message, command).await,
            Route::UnknownCommand(token) => {
                info!(command = %token, "Unknown command");
                self.bot.reply_to(message, UNKNOWN_COMMAND_TEXT).await?;
                Ok(HandlerResponse::Stop)
            }
            Route::OtherBot => Ok(HandlerResponse::Continue),
            Route::Text(text) => self.handle_turn(message, &text).await,
        }
    }
}
