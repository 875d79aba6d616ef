use crate::message::{ChatMessage, MessageRole};

/// System instruction used when no custom prompt is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant. Be patient and wait for the instructions. Give helpful replies to the questions.";

/// Ordered transcript for one conversation.
///
/// Invariant: there is exactly one leading system message, `messages[0]`. It is never dropped or
/// replaced except by [`reset`], which restores the single-element transcript built from the
/// configured system prompt. A `System` message passed to [`append`] is stored as a later entry.
///
/// Growth is unbounded unless a history limit is set with [`with_history_limit`]. The limit
/// counts every entry after the leading one and trims whole turns: the kept window always starts
/// at a `User` message, so no reply is sent without the question it answered.
///
/// [`append`]: ConversationContext::append
///
/// [`reset`]: ConversationContext::reset
/// [`with_history_limit`]: ConversationContext::with_history_limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationContext {
    system_prompt: String,
    messages: Vec<ChatMessage>,
    history_limit: Option<usize>,
}

impl ConversationContext {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        let system_prompt = system_prompt.into();
        Self {
            messages: vec![ChatMessage::system(system_prompt.clone())],
            system_prompt,
            history_limit: None,
        }
    }

    /// Caps the number of entries kept after the leading system message, trimming whole turns.
    /// `0` means no cap.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = (limit > 0).then_some(limit);
        self.enforce_history_limit();
        self
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn history_limit(&self) -> Option<usize> {
        self.history_limit
    }

    /// Adds one message at the end. A `System` role is stored as given; it does not replace
    /// the leading system instruction.
    pub fn append(&mut self, role: MessageRole, content: impl Into<String>) {
        self.messages.push(ChatMessage::new(role, content));
        self.enforce_history_limit();
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.append(MessageRole::User, content);
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.append(MessageRole::Assistant, content);
    }

    /// Replaces the transcript with a single fresh system message.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages
            .push(ChatMessage::system(self.system_prompt.clone()));
    }

    /// Full ordered transcript including the leading system message.
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.clone()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: the system message is never removed.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn enforce_history_limit(&mut self) {
        let Some(limit) = self.history_limit else {
            return;
        };
        let history = self.messages.len() - 1;
        if history <= limit {
            return;
        }
        let earliest = 1 + (history - limit);
        let is_user = |m: &ChatMessage| m.role == MessageRole::User;
        // Cut at the first user message inside the window; when the window holds none (the newest
        // turn alone exceeds the cap) keep that turn whole.
        let cut = self.messages[earliest..]
            .iter()
            .position(is_user)
            .map(|i| earliest + i)
            .or_else(|| self.messages[1..earliest].iter().rposition(is_user).map(|i| 1 + i))
            .unwrap_or(earliest);
        self.messages.drain(1..cut);
    }
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_PROMPT)
    }
}
