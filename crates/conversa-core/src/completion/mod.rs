//! External completion service
//!
//! The orchestrator talks to the service through the [`CompletionService`]
//! trait so tests can substitute a stub; [`CompletionClient`] is the real
//! reqwest-backed implementation.

mod client;

pub use client::CompletionClient;

use async_trait::async_trait;

use crate::error::CompletionError;
use crate::message::ChatMessage;

/// Seam to the external chat-completion API.
///
/// Implementations return the raw assistant text (possibly empty); the
/// caller decides what an empty completion means.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError>;
}
