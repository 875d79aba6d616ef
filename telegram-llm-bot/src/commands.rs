//! Bot commands and routing of inbound text (command, unknown command, or free text).

use llm_client::ProviderKind;
use teloxide::utils::command::{BotCommands, ParseError};

pub const START_TEXT: &str = "Hi there! 👋\nI'm a Chat Bot. How can I assist you today?";
pub const CLEARED_TEXT: &str = "All conversation context has been cleared. Let's start fresh! ✨";
pub const UNKNOWN_COMMAND_TEXT: &str =
    "Unknown command. Please use /openai or /mistralai to select the AI client.";
/// Sent instead of a reply whenever the provider call fails, whatever the cause.
pub const APOLOGY_TEXT: &str =
    "Sorry, I encountered an issue while processing your request. Please try again.";

#[derive(BotCommands, Clone, Copy, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "start the conversation.")]
    Start,
    #[command(description = "display this help menu.")]
    Help,
    #[command(description = "clear the current conversation and context.")]
    Clear,
    #[command(description = "choose OpenAI.")]
    OpenAi,
    #[command(description = "choose MistralAI.")]
    MistralAi,
}

impl Command {
    /// The provider this command selects, if it is a provider-selection command.
    pub fn provider(&self) -> Option<ProviderKind> {
        match self {
            Command::OpenAi => Some(ProviderKind::OpenAi),
            Command::MistralAi => Some(ProviderKind::MistralAi),
            _ => None,
        }
    }
}

/// Help menu listing every command.
pub fn help_text() -> String {
    format!(
        "Help Menu 🤖\n{}\n\nHow can I assist you? 😊",
        Command::descriptions()
    )
}

pub fn provider_selected_text(kind: ProviderKind) -> String {
    let emoji = match kind {
        ProviderKind::OpenAi => "🎉",
        ProviderKind::MistralAi => "🚀",
    };
    format!(
        "{} Client selected! {}\nHow can I assist you?",
        kind.display_name(),
        emoji
    )
}

/// Where an inbound text goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Command(Command),
    /// Slash-prefixed but not one of ours; answered with [`UNKNOWN_COMMAND_TEXT`].
    UnknownCommand(String),
    /// `/cmd@other_bot` in a group; not addressed to this bot.
    OtherBot,
    /// Free text for the turn-processing state machine.
    Text(String),
}

/// Classifies `text`. Only the first word of a command is parsed, so `/clear now` is `/clear`,
/// and case is ignored, so `/OpenAI` is `/openai`.
/// `bot_username` lets `/cmd@this_bot` match; when unknown, any `@suffix` is accepted.
pub fn route(text: &str, bot_username: Option<&str>) -> Route {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return Route::Text(text.to_string());
    }

    let token = trimmed.split_whitespace().next().unwrap_or(trimmed);
    let (token, bot_name) = match bot_username {
        Some(name) => (token, name.to_lowercase()),
        None => (token.split('@').next().unwrap_or(token), String::new()),
    };

    // Commands and bot usernames are matched case-insensitively, as Telegram clients do.
    match Command::parse(&token.to_lowercase(), &bot_name) {
        Ok(command) => Route::Command(command),
        Err(ParseError::WrongBotName(_)) => Route::OtherBot,
        Err(_) => Route::UnknownCommand(token.to_string()),
    }
}
