//! Connection factory for per-operation store access

use std::path::{Path, PathBuf};

use super::repository::Repository;
use crate::error::Result;

/// Handle to the SQLite database file.
///
/// Opening the store applies the schema once; every subsequent operation
/// gets its own short-lived connection via [`Store::open`]. There is no
/// pooling and no connection shared across operations, so store access
/// serializes at the file level but nothing protects cross-record
/// invariants between two operations.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Create the store, applying `CREATE TABLE IF NOT EXISTS` migrations
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let repo = Repository::open(&path)?;
        repo.initialize()?;
        Ok(Self { path })
    }

    /// Open a fresh connection for one operation
    pub fn open(&self) -> Result<Repository> {
        Repository::open(&self.path)
    }

    /// Path of the underlying database file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
