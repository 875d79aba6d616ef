//! Polling runner: converts each teloxide message to a core [`dbot_core::Message`] and hands it
//! to the [`HandlerChain`] in its own task.

use anyhow::Result;
use dbot_core::ToCoreMessage;
use handler_chain::HandlerChain;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{error, info, instrument, warn};

use super::adapters::TelegramMessageWrapper;

/// Starts long polling with the given bot and chain.
///
/// Calls `get_me()` first and stores the bot username in `bot_username` (used to parse
/// `/cmd@botname`). Every inbound message is processed in a spawned task, so a failing or slow
/// turn never blocks or crashes the polling loop.
#[instrument(skip(bot, handler_chain, bot_username))]
pub async fn run_repl(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    bot_username: Arc<tokio::sync::RwLock<Option<String>>>,
) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => {
            if let Some(username) = &me.user.username {
                *bot_username.write().await = Some(username.clone());
                info!(username = %username, "Bot username set before polling");
            }
        }
        Err(e) => warn!(error = %e, "get_me failed; commands addressed as /cmd@bot will not match"),
    }

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = handler_chain.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                has_text = !core_msg.content.is_empty(),
                "Received message"
            );

            tokio::spawn(async move {
                if let Err(e) = chain.handle(&core_msg).await {
                    error!(error = %e, chat_id = core_msg.chat.id, "Handler chain failed");
                }
            });

            respond(())
        }
    })
    .await;

    Ok(())
}
