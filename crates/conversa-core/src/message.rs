//! Message types shared by the store and the completion client

use serde::{Deserialize, Serialize};

/// Speaker role, serialized lowercase on the completion wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    pub fn parse(s: &str) -> Role {
        match s {
            "system" => Role::System,
            "assistant" => Role::Assistant,
            _ => Role::User,
        }
    }
}

/// Kind discriminator for persisted message rows.
///
/// The numeric values are part of the persisted format: exchange rows
/// carry 9, running-context rows carry 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Exchange,
    Context,
}

impl MessageKind {
    pub fn as_i64(&self) -> i64 {
        match self {
            MessageKind::Exchange => 9,
            MessageKind::Context => 2,
        }
    }

    pub fn parse(value: i64) -> MessageKind {
        match value {
            2 => MessageKind::Context,
            _ => MessageKind::Exchange,
        }
    }
}

/// A single row in the `messages` table
#[derive(Debug, Clone)]
pub struct MessageRecord {
    pub id: i64,
    pub session_id: String,
    pub role: Role,
    pub content: String,
    pub kind: MessageKind,
}

/// One `{role, content}` entry in an outbound completion payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}
