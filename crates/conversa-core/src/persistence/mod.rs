//! Persistence layer for conversa state
//!
//! Provides SQLite-backed storage for exchange logs, per-session running
//! context, and global settings. Connections are short-lived: the `Store`
//! factory opens one per operation and RAII drop releases it.

mod repository;
mod schema;
mod store;

pub use repository::Repository;
pub use schema::Schema;
pub use store::Store;
