//! # Database State
//!
//! Wraps the `Database` handle for use in desk commands.
//!
//! The `SqlitePool` inside is thread-safe; commands can share one `DbState`.

use pharmacy_db::Database;

/// Wrapper around `Database` handed to every command that touches the store.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::DbState;
    use pharmacy_db::{Database, DbConfig};

    /// A fresh in-memory store per test.
    pub async fn test_state() -> DbState {
        DbState::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }
}
