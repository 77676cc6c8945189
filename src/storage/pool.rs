//! Database connection pool management.
//!
//! Initializes the SQLite connection pool with:
//! - WAL mode enabled for concurrent access
//! - Foreign-key enforcement on, so deleting a result removes its links and
//!   deleting a target removes its results
//! - Automatic database file creation

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;

/// Initializes and returns a database connection pool for the given path.
///
/// Creates the database file if it doesn't exist and enables WAL mode for
/// better concurrent access. Foreign keys are enabled on every pooled
/// connection; the cascade deletes in the schema depend on it.
pub async fn init_db_pool_with_path(db_path: &Path) -> Result<Arc<SqlitePool>, DatabaseError> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePool::connect_with(options).await?;
    info!("Database pool ready at {}", db_path.display());
    Ok(Arc::new(pool))
}

/// Initializes an in-memory database pool.
///
/// Used by tests and throwaway runs. Capped at a single connection because
/// each new in-memory connection would otherwise open its own empty
/// database.
pub async fn init_memory_pool() -> Result<Arc<SqlitePool>, DatabaseError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    Ok(Arc::new(pool))
}
