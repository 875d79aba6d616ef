//! Splitting outbound text into pieces Telegram accepts.

/// Telegram rejects `sendMessage` texts longer than this many characters.
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Splits `text` into chunks of at most `max_chars` characters.
///
/// A chunk ends after the last newline inside its window when there is one, otherwise at the
/// character limit. Chunks are never empty and concatenate back to `text`.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    while let Some((window_end, _)) = rest.char_indices().nth(max_chars) {
        let cut = match rest[..window_end].rfind('\n') {
            Some(i) => i + 1,
            None => window_end,
        };
        chunks.push(rest[..cut].to_string());
        rest = &rest[cut..];
    }
    if !rest.is_empty() || chunks.is_empty() {
        chunks.push(rest.to_string());
    }
    chunks
}
