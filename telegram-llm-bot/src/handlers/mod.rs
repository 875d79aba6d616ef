//! Handlers placed in the chain by [`crate::build_handler_chain`].

mod conversation;

pub use conversation::ConversationHandler;
