//! Result store.
//!
//! Analysis results are append-only: one row per completed run, with its
//! link records inserted in document order inside the same transaction.

use log::debug;
use sqlx::{Row, SqlitePool};

use crate::error_handling::DatabaseError;
use crate::models::{AnalysisRecord, AnalysisResult, HeadingCounts, Link};

/// Persists a finished analysis with its nested links.
///
/// The result row and every link row commit atomically; a failure rolls the
/// whole record back so no partial result is ever visible. Returns the new
/// result id.
pub async fn insert_result(
    pool: &SqlitePool,
    target_id: i64,
    record: &AnalysisRecord,
) -> Result<i64, DatabaseError> {
    let headings_json = serde_json::to_string(&record.headings)?;

    let mut tx = pool.begin().await?;

    let result_id = sqlx::query(
        "INSERT INTO analysis_results (
            target_id, html_version, title, headings,
            internal_links, external_links, broken_links, login_form, created_at_ms
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(target_id)
    .bind(&record.html_version)
    .bind(&record.title)
    .bind(&headings_json)
    .bind(record.internal_links)
    .bind(record.external_links)
    .bind(record.broken_links)
    .bind(record.login_form)
    .bind(record.created_at_ms)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    for (position, link) in record.links.iter().enumerate() {
        sqlx::query(
            "INSERT INTO links (result_id, position, href, internal, broken, http_status)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(result_id)
        .bind(position as i64)
        .bind(&link.href)
        .bind(link.internal)
        .bind(link.broken)
        .bind(link.http_status)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    debug!(
        "persisted result {result_id} for target {target_id} ({} links)",
        record.links.len()
    );
    Ok(result_id)
}

/// Reads all persisted results for a target, oldest first, links included.
pub async fn list_results(
    pool: &SqlitePool,
    target_id: i64,
) -> Result<Vec<AnalysisResult>, DatabaseError> {
    let result_rows = sqlx::query(
        "SELECT id, target_id, html_version, title, headings,
                internal_links, external_links, broken_links, login_form, created_at_ms
         FROM analysis_results WHERE target_id = ? ORDER BY id",
    )
    .bind(target_id)
    .fetch_all(pool)
    .await?;

    let mut results = Vec::with_capacity(result_rows.len());
    for row in result_rows {
        let headings_json: String = row.get("headings");
        let headings: HeadingCounts = serde_json::from_str(&headings_json)?;
        let result_id: i64 = row.get("id");

        let link_rows = sqlx::query(
            "SELECT href, internal, broken, http_status
             FROM links WHERE result_id = ? ORDER BY position",
        )
        .bind(result_id)
        .fetch_all(pool)
        .await?;

        let links = link_rows
            .iter()
            .map(|link_row| Link {
                href: link_row.get("href"),
                internal: link_row.get("internal"),
                broken: link_row.get("broken"),
                http_status: link_row.get("http_status"),
            })
            .collect();

        results.push(AnalysisResult {
            id: result_id,
            target_id: row.get("target_id"),
            html_version: row.get("html_version"),
            title: row.get("title"),
            headings,
            internal_links: row.get("internal_links"),
            external_links: row.get("external_links"),
            broken_links: row.get("broken_links"),
            login_form: row.get("login_form"),
            created_at_ms: row.get("created_at_ms"),
            links,
        });
    }

    Ok(results)
}
