//! # Handler chain
//!
//! Runs an ordered list of [`Handler`]s for each inbound message: every `before` in order (any
//! `false` stops the chain), then `handle` until one returns Stop or Reply, then every `after` in
//! reverse order with the final response.

use dbot_core::{Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Ordered handlers sharing one message. Cheap to clone (handlers are `Arc`ed).
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler; handlers run in insertion order.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Drives one message through the chain and returns the first Stop/Reply, or Continue.
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, message_id = %message.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        for handler in &self.handlers {
            if !handler.before(message).await? {
                info!(
                    handler = %std::any::type_name_of_val(handler.as_ref()),
                    "before returned false, chain stopped"
                );
                return Ok(HandlerResponse::Stop);
            }
        }

        let mut final_response = HandlerResponse::Continue;
        for handler in &self.handlers {
            let response = handler.handle(message).await?;
            debug!(
                handler = %std::any::type_name_of_val(handler.as_ref()),
                response = ?response,
                "handler processed"
            );
            if response != HandlerResponse::Continue {
                final_response = response;
                break;
            }
        }

        for handler in self.handlers.iter().rev() {
            handler.after(message, &final_response).await?;
        }

        let response_type = match &final_response {
            HandlerResponse::Continue => "Continue",
            HandlerResponse::Stop => "Stop",
            HandlerResponse::Reply(_) => "Reply",
        };
        info!(response_type, "handler chain finished");

        Ok(final_response)
    }
}
