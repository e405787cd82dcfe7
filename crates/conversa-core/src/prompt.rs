//! Global system prompt, persisted as a settings row

use crate::error::Result;
use crate::persistence::Store;

/// Settings row holding the global prompt
pub const SYSTEM_PROMPT_KEY: &str = "system_prompt";

/// Built-in prompt, used only to seed a fresh store
pub const DEFAULT_SYSTEM_PROMPT: &str = "🎯 **Oi! sou criador de assistente\n";

/// Reads and writes the single global system-prompt record
#[derive(Debug, Clone)]
pub struct PromptManager {
    store: Store,
}

impl PromptManager {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Get the global system prompt, seeding the built-in default on a
    /// fresh store. The first call after a fresh store mutates the store;
    /// the seeding never repeats.
    pub fn current(&self) -> Result<String> {
        let repo = self.store.open()?;
        if let Some(content) = repo.get_setting(SYSTEM_PROMPT_KEY)? {
            return Ok(content);
        }

        repo.set_setting(SYSTEM_PROMPT_KEY, DEFAULT_SYSTEM_PROMPT)?;
        tracing::info!("seeded default system prompt");
        Ok(DEFAULT_SYSTEM_PROMPT.to_string())
    }

    /// Replace (or create) the global system prompt.
    ///
    /// Stores `content` as given; the HTTP boundary rejects empty or
    /// whitespace-only input before it reaches here.
    pub fn update(&self, content: &str) -> Result<()> {
        self.store.open()?.set_setting(SYSTEM_PROMPT_KEY, content)
    }
}
