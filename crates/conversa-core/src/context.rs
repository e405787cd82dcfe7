//! Per-session running context
//!
//! Each session keeps a single accumulated summary string that is replayed
//! into every outbound completion request. Writes replace the whole string;
//! composition appends one `Usuário:`/`Assistente:` pair and drops the
//! oldest characters once the cap is exceeded.

use crate::error::Result;
use crate::persistence::Store;

/// Maximum retained context size, in characters
pub const MAX_CONTEXT_CHARS: usize = 4000;

/// Reads and replaces the single running-context record per session
#[derive(Debug, Clone)]
pub struct ContextManager {
    store: Store,
}

impl ContextManager {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Get a session's context, or the empty string if none exists.
    /// Pure read, no side effect.
    pub fn get(&self, session_id: &str) -> Result<String> {
        Ok(self.store.open()?.context(session_id)?.unwrap_or_default())
    }

    /// Replace a session's context with the full desired string.
    ///
    /// Replace, not append: callers pass the complete composed context.
    /// Last writer wins when two requests race on the same session.
    pub fn replace(&self, session_id: &str, content: &str) -> Result<()> {
        self.store.open()?.replace_context(session_id, content)
    }
}

/// Compose the next context string from the previous one plus a new turn,
/// trimmed and tail-truncated to [`MAX_CONTEXT_CHARS`].
pub fn compose(existing: &str, user_text: &str, reply: &str) -> String {
    let combined = format!(
        "{}\nUsuário: {}\nAssistente: {}",
        existing, user_text, reply
    );
    truncate_tail(combined.trim(), MAX_CONTEXT_CHARS).to_string()
}

/// Keep the trailing `max_chars` characters of `text`.
///
/// Character-based, not byte- or token-aware; may cut mid-word or mid-line.
pub fn truncate_tail(text: &str, max_chars: usize) -> &str {
    let total = text.chars().count();
    if total <= max_chars {
        return text;
    }
    match text.char_indices().nth(total - max_chars) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}
