//! SQLite schema for conversa state storage

/// SQLite schema definition
pub struct Schema;

impl Schema {
    /// Get the complete schema SQL
    ///
    /// `messages.kind` carries 9 for exchange rows (append-only turn log)
    /// and 2 for running-context rows (at most one per session).
    pub fn create_tables() -> &'static str {
        r#"
-- Per-session turn log and running context
CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id TEXT NOT NULL,
    role TEXT,
    content TEXT,
    kind INTEGER
);

CREATE INDEX IF NOT EXISTS idx_messages_session_kind ON messages(session_id, kind);

-- Global configuration entries (system prompt lives here)
CREATE TABLE IF NOT EXISTS settings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT UNIQUE NOT NULL,
    content TEXT NOT NULL
);
"#
    }
}
