//! Target record store.
//!
//! Every function here reads or writes authoritative state: the engine's
//! cancellation gate and the stop request race against each other through
//! these rows, so each write is its own immediately visible statement.

use chrono::Utc;
use log::debug;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error_handling::DatabaseError;
use crate::models::{Target, TargetStatus};

fn target_from_row(row: &SqliteRow) -> Result<Target, DatabaseError> {
    let status_text: String = row.get("status");
    let status = status_text
        .parse::<TargetStatus>()
        .map_err(|_| DatabaseError::InvalidStatus(status_text))?;
    Ok(Target {
        id: row.get("id"),
        address: row.get("address"),
        status,
        created_at_ms: row.get("created_at_ms"),
        updated_at_ms: row.get("updated_at_ms"),
    })
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Registers a new target in `queued` state.
///
/// Addresses are unique; registering one that is already tracked fails with
/// [`DatabaseError::DuplicateAddress`].
pub async fn create_target(pool: &SqlitePool, address: &str) -> Result<Target, DatabaseError> {
    let now = Utc::now().timestamp_millis();
    let result = sqlx::query(
        "INSERT INTO targets (address, status, created_at_ms, updated_at_ms)
         VALUES (?, ?, ?, ?)",
    )
    .bind(address)
    .bind(TargetStatus::Queued.to_string())
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            DatabaseError::DuplicateAddress(address.to_string())
        } else {
            DatabaseError::SqlError(e)
        }
    })?;

    debug!("registered target {} ({address})", result.last_insert_rowid());
    Ok(Target {
        id: result.last_insert_rowid(),
        address: address.to_string(),
        status: TargetStatus::Queued,
        created_at_ms: now,
        updated_at_ms: now,
    })
}

/// Fetches a target by id.
pub async fn get_target(pool: &SqlitePool, id: i64) -> Result<Target, DatabaseError> {
    let row = sqlx::query("SELECT id, address, status, created_at_ms, updated_at_ms FROM targets WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DatabaseError::TargetNotFound(id))?;
    target_from_row(&row)
}

/// Lists all targets, oldest first.
pub async fn list_targets(pool: &SqlitePool) -> Result<Vec<Target>, DatabaseError> {
    let rows = sqlx::query(
        "SELECT id, address, status, created_at_ms, updated_at_ms FROM targets ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    rows.iter().map(target_from_row).collect()
}

/// Sets a target's status unconditionally.
pub async fn set_target_status(
    pool: &SqlitePool,
    id: i64,
    status: TargetStatus,
) -> Result<(), DatabaseError> {
    let affected = sqlx::query("UPDATE targets SET status = ?, updated_at_ms = ? WHERE id = ?")
        .bind(status.to_string())
        .bind(Utc::now().timestamp_millis())
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();
    if affected == 0 {
        return Err(DatabaseError::TargetNotFound(id));
    }
    Ok(())
}

/// Claims a target for an analysis run.
///
/// Atomically moves the target to `running` unless it already is; the
/// conditional UPDATE is what makes a second start for the same target a
/// no-op instead of a duplicate run. Returns whether the claim succeeded.
pub async fn claim_target(pool: &SqlitePool, id: i64) -> Result<bool, DatabaseError> {
    // Distinguish "missing" from "already running" up front.
    get_target(pool, id).await?;

    let affected = sqlx::query(
        "UPDATE targets SET status = ?, updated_at_ms = ? WHERE id = ? AND status <> ?",
    )
    .bind(TargetStatus::Running.to_string())
    .bind(Utc::now().timestamp_millis())
    .bind(id)
    .bind(TargetStatus::Running.to_string())
    .execute(pool)
    .await?
    .rows_affected();

    Ok(affected == 1)
}

/// Requests that an in-flight run stop at its next gate checkpoint.
///
/// Only a `running` target transitions to `stopped`; requesting a stop in
/// any other state leaves the target untouched. Returns the status after the
/// request.
pub async fn request_stop(pool: &SqlitePool, id: i64) -> Result<TargetStatus, DatabaseError> {
    sqlx::query("UPDATE targets SET status = ?, updated_at_ms = ? WHERE id = ? AND status = ?")
        .bind(TargetStatus::Stopped.to_string())
        .bind(Utc::now().timestamp_millis())
        .bind(id)
        .bind(TargetStatus::Running.to_string())
        .execute(pool)
        .await?;
    Ok(get_target(pool, id).await?.status)
}

/// Updates a target's address.
///
/// A changed address invalidates everything learned about the old one: all
/// prior analysis results (and their links, via cascade) are deleted in the
/// same transaction and the status resets to `queued`.
pub async fn update_target_address(
    pool: &SqlitePool,
    id: i64,
    address: &str,
) -> Result<Target, DatabaseError> {
    get_target(pool, id).await?;

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM analysis_results WHERE target_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("UPDATE targets SET address = ?, status = ?, updated_at_ms = ? WHERE id = ?")
        .bind(address)
        .bind(TargetStatus::Queued.to_string())
        .bind(Utc::now().timestamp_millis())
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DatabaseError::DuplicateAddress(address.to_string())
            } else {
                DatabaseError::SqlError(e)
            }
        })?;

    tx.commit().await?;
    get_target(pool, id).await
}

/// Deletes a target and, via cascade, its results and links.
pub async fn delete_target(pool: &SqlitePool, id: i64) -> Result<(), DatabaseError> {
    let affected = sqlx::query("DELETE FROM targets WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();
    if affected == 0 {
        return Err(DatabaseError::TargetNotFound(id));
    }
    Ok(())
}
