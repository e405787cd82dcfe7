//! Repository for CRUD operations on conversa state

use std::path::Path;

use super::schema::Schema;
use crate::error::{PersistenceError, Result};
use crate::message::{MessageKind, MessageRecord, Role};

/// Repository wrapping one SQLite connection
pub struct Repository {
    conn: rusqlite::Connection,
}

impl Repository {
    /// Open a connection without touching the schema
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = rusqlite::Connection::open(path).map_err(PersistenceError::from)?;
        Ok(Self { conn })
    }

    /// Create an in-memory repository with the schema applied (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = rusqlite::Connection::open_in_memory().map_err(PersistenceError::from)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Apply the schema; create-if-not-exists only, no migrations
    pub fn initialize(&self) -> Result<()> {
        self.conn
            .execute_batch(Schema::create_tables())
            .map_err(PersistenceError::from)?;
        Ok(())
    }

    // ==================== Exchange Operations ====================

    /// Append one user or assistant turn to the append-only exchange log
    pub fn append_exchange(&self, session_id: &str, role: Role, content: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO messages (session_id, role, content, kind) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![
                    session_id,
                    role.as_str(),
                    content,
                    MessageKind::Exchange.as_i64()
                ],
            )
            .map_err(PersistenceError::from)?;
        Ok(())
    }

    /// Get a session's messages of one kind, in insertion order
    pub fn messages_by_kind(
        &self,
        session_id: &str,
        kind: MessageKind,
    ) -> Result<Vec<MessageRecord>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, session_id, role, content, kind FROM messages \
                 WHERE session_id = ?1 AND kind = ?2 ORDER BY id",
            )
            .map_err(PersistenceError::from)?;

        let records = stmt
            .query_map(
                rusqlite::params![session_id, kind.as_i64()],
                Self::row_to_record,
            )
            .map_err(PersistenceError::from)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(PersistenceError::from)?;

        Ok(records)
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<MessageRecord> {
        let role_str: Option<String> = row.get(2)?;
        let content: Option<String> = row.get(3)?;
        let kind: i64 = row.get(4)?;

        Ok(MessageRecord {
            id: row.get(0)?,
            session_id: row.get(1)?,
            role: Role::parse(role_str.as_deref().unwrap_or("user")),
            content: content.unwrap_or_default(),
            kind: MessageKind::parse(kind),
        })
    }

    // ==================== Context Operations ====================

    /// Get a session's running context, if one has been written
    pub fn context(&self, session_id: &str) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT content FROM messages WHERE session_id = ?1 AND kind = ?2",
            rusqlite::params![session_id, MessageKind::Context.as_i64()],
            |row| row.get(0),
        );

        match result {
            Ok(content) => Ok(Some(content)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(PersistenceError::from(e).into()),
        }
    }

    /// Replace a session's running context.
    ///
    /// Delete-then-insert, two statements; intentionally not wrapped in a
    /// transaction. At most one context row per session survives.
    pub fn replace_context(&self, session_id: &str, content: &str) -> Result<()> {
        self.conn
            .execute(
                "DELETE FROM messages WHERE session_id = ?1 AND kind = ?2",
                rusqlite::params![session_id, MessageKind::Context.as_i64()],
            )
            .map_err(PersistenceError::from)?;
        self.conn
            .execute(
                "INSERT INTO messages (session_id, role, content, kind) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![
                    session_id,
                    Role::System.as_str(),
                    content,
                    MessageKind::Context.as_i64()
                ],
            )
            .map_err(PersistenceError::from)?;
        Ok(())
    }

    // ==================== Settings Operations ====================

    /// Get a global setting value
    pub fn get_setting(&self, name: &str) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT content FROM settings WHERE name = ?1",
            [name],
            |row| row.get(0),
        );

        match result {
            Ok(content) => Ok(Some(content)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(PersistenceError::from(e).into()),
        }
    }

    /// Set a global setting value, creating or fully overwriting the row
    pub fn set_setting(&self, name: &str, content: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO settings (name, content) VALUES (?1, ?2)",
                [name, content],
            )
            .map_err(PersistenceError::from)?;
        Ok(())
    }
}
