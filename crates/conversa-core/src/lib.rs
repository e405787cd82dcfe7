//! Conversa Core - incremental-context chat relay
//!
//! This crate provides the domain logic for the conversa backend:
//!
//! - **Persistence**: SQLite storage for the append-only exchange log,
//!   per-session running context, and global settings
//! - **Context**: the single running-summary string per session, replaced
//!   on every turn and tail-truncated at 4000 characters
//! - **Prompt**: the global system prompt, seeded with a built-in default
//!   on first access
//! - **Completion**: trait seam plus reqwest client for the external
//!   chat-completions API
//! - **Chat**: the per-request orchestration that composes prompt, context,
//!   and the new message into one completion call and writes back the
//!   exchange
//!
//! All state lives in the store; requests are stateless and concurrent
//! turns on one session intentionally race on the context replace (last
//! writer wins).

pub mod chat;
pub mod completion;
pub mod config;
pub mod context;
pub mod error;
pub mod message;
pub mod persistence;
pub mod prompt;

pub use chat::{ChatOutcome, ChatRelay};
pub use completion::{CompletionClient, CompletionService};
pub use config::{AppConfig, CompletionConfig};
pub use context::{ContextManager, MAX_CONTEXT_CHARS};
pub use error::{CompletionError, ConversaError, PersistenceError, Result};
pub use message::{ChatMessage, MessageKind, MessageRecord, Role};
pub use persistence::{Repository, Schema, Store};
pub use prompt::{PromptManager, DEFAULT_SYSTEM_PROMPT};
