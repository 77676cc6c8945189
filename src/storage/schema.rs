//! Schema creation.

use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;

/// Creates the tables if they do not exist yet.
///
/// `targets` owns `analysis_results`, which owns `links`; both child tables
/// cascade on delete. Heading counts live in a JSON text column on the
/// result row.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), DatabaseError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS targets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            address TEXT NOT NULL UNIQUE,
            status TEXT NOT NULL DEFAULT 'queued',
            created_at_ms INTEGER NOT NULL,
            updated_at_ms INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS analysis_results (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            target_id INTEGER NOT NULL REFERENCES targets(id) ON DELETE CASCADE,
            html_version TEXT NOT NULL,
            title TEXT NOT NULL,
            headings TEXT NOT NULL,
            internal_links INTEGER NOT NULL,
            external_links INTEGER NOT NULL,
            broken_links INTEGER NOT NULL,
            login_form INTEGER NOT NULL,
            created_at_ms INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS links (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            result_id INTEGER NOT NULL REFERENCES analysis_results(id) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            href TEXT NOT NULL,
            internal INTEGER NOT NULL,
            broken INTEGER NOT NULL,
            http_status INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_results_target ON analysis_results(target_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_links_result ON links(result_id)")
        .execute(pool)
        .await?;

    Ok(())
}
