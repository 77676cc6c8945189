//! Analysis engine.
//!
//! Orchestrates one analysis run: fetch → parse → per-link resolve/probe →
//! aggregate → persist, re-reading the target's durable status at three
//! checkpoints so a stop requested from any other process or task halts the
//! run cooperatively. Status transitions are written through to the store
//! the moment they happen; external observers polling the target row never
//! see batched or stale state.

use std::sync::Arc;

use chrono::Utc;
use log::{info, warn};
use sqlx::SqlitePool;

use crate::error_handling::{DatabaseError, EngineError};
use crate::links::verify_links;
use crate::models::{AnalysisRecord, TargetStatus};
use crate::parse::parse_page;
use crate::storage;

/// Shared resources an analysis run needs.
///
/// Passed explicitly rather than held in module state so tests can inject
/// their own pool and clients.
#[derive(Clone)]
pub struct EngineContext {
    /// Target and result store handle.
    pub pool: Arc<SqlitePool>,
    /// Client for the initial page fetch (plain identity).
    pub page_client: Arc<reqwest::Client>,
    /// Client for link probes (fixed short timeout, crawler identity).
    pub probe_client: Arc<reqwest::Client>,
}

/// Aggregate numbers from a completed run.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    /// Persisted result row id.
    pub result_id: i64,
    /// Links classified internal.
    pub internal_links: i64,
    /// Links classified external.
    pub external_links: i64,
    /// Links marked broken.
    pub broken_links: i64,
}

/// How an analysis run ended, short of an error.
#[derive(Debug, Clone, Copy)]
pub enum RunOutcome {
    /// The run finished and persisted a result.
    Completed(RunSummary),
    /// A stop request was observed at a gate checkpoint; nothing persisted.
    Stopped,
    /// Another run already holds this target; this start was a no-op.
    AlreadyRunning,
}

/// The cancellation gate: re-reads the target's authoritative status.
///
/// Returns whether the run should continue. Deliberately a fresh store read
/// every time — the stop request may come from a different process, so an
/// in-memory flag could never observe it.
pub async fn should_continue(pool: &SqlitePool, target_id: i64) -> Result<bool, DatabaseError> {
    let target = storage::get_target(pool, target_id).await?;
    Ok(target.status != TargetStatus::Stopped)
}

/// Runs one analysis against a target, start to finish.
///
/// Claims the target (`running`), fetches and parses the page, resolves and
/// probes every anchor, persists the aggregated result, and finishes the
/// status at `done`. Fetch, parse, and persist failures set the status to
/// `error` before returning; a stop observed at any gate checkpoint halts
/// silently with [`RunOutcome::Stopped`]. Starting a target that is already
/// `running` is a no-op.
pub async fn run_analysis(ctx: &EngineContext, target_id: i64) -> Result<RunOutcome, EngineError> {
    if !storage::claim_target(&ctx.pool, target_id).await? {
        info!("target {target_id} already has a run in flight; ignoring start");
        return Ok(RunOutcome::AlreadyRunning);
    }
    run_claimed(ctx, target_id).await
}

async fn run_claimed(ctx: &EngineContext, target_id: i64) -> Result<RunOutcome, EngineError> {
    let pool = ctx.pool.as_ref();

    // Gate checkpoint (a): a stop may have landed between the claim and now.
    if !should_continue(pool, target_id).await? {
        info!("target {target_id}: stop observed before fetch");
        return Ok(RunOutcome::Stopped);
    }
    let target = storage::get_target(pool, target_id).await?;

    let response = match ctx.page_client.get(&target.address).send().await {
        Ok(response) => response,
        Err(e) => {
            mark_error(pool, target_id).await;
            return Err(EngineError::Fetch {
                address: target.address,
                source: e,
            });
        }
    };
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            mark_error(pool, target_id).await;
            return Err(EngineError::Parse {
                address: target.address,
                source: e,
            });
        }
    };

    let report = parse_page(&body);

    // Gate checkpoint (b): last exit before the expensive probe phase.
    if !should_continue(pool, target_id).await? {
        info!("target {target_id}: stop observed before link verification");
        return Ok(RunOutcome::Stopped);
    }

    let base = target
        .address
        .strip_suffix('/')
        .unwrap_or(&target.address);
    let verification = verify_links(&ctx.probe_client, base, &report.anchors).await;

    // Gate checkpoint (c): nothing may be persisted after a stop.
    if !should_continue(pool, target_id).await? {
        info!("target {target_id}: stop observed before persisting result");
        return Ok(RunOutcome::Stopped);
    }

    let record = AnalysisRecord {
        html_version: report.html_version,
        title: report.title,
        headings: report.headings,
        internal_links: verification.internal,
        external_links: verification.external,
        broken_links: verification.broken,
        login_form: report.login_form,
        created_at_ms: Utc::now().timestamp_millis(),
        links: verification.links,
    };

    let result_id = match storage::insert_result(pool, target_id, &record).await {
        Ok(result_id) => result_id,
        Err(e) => {
            mark_error(pool, target_id).await;
            return Err(EngineError::Persist {
                target_id,
                source: e,
            });
        }
    };

    // Re-read after persisting: a stop that raced the persist wins and the
    // `stopped` status must not be overwritten.
    if should_continue(pool, target_id).await? {
        storage::set_target_status(pool, target_id, TargetStatus::Done).await?;
    }

    info!(
        "analysis completed for {}: {} internal, {} external, {} broken links",
        target.address, verification.internal, verification.external, verification.broken
    );

    Ok(RunOutcome::Completed(RunSummary {
        result_id,
        internal_links: verification.internal,
        external_links: verification.external,
        broken_links: verification.broken,
    }))
}

/// Launches an analysis run in the background, fire-and-forget.
///
/// Returns as soon as the run is spawned. The caller does not retain the
/// task handle; completion is observable only through the target's durable
/// status. Terminal errors are logged since no caller is left to receive
/// them.
pub fn start_analysis(ctx: Arc<EngineContext>, target_id: i64) {
    tokio::spawn(async move {
        match run_analysis(&ctx, target_id).await {
            Ok(RunOutcome::Completed(summary)) => {
                info!(
                    "background run for target {target_id} persisted result {}",
                    summary.result_id
                );
            }
            Ok(RunOutcome::Stopped) => {
                info!("background run for target {target_id} was stopped");
            }
            Ok(RunOutcome::AlreadyRunning) => {}
            Err(e) => {
                warn!("background run for target {target_id} failed: {e}");
            }
        }
    });
}

/// Sets the target to `error`, logging rather than masking a failed write.
///
/// Called on terminal run failures; the original error is what propagates to
/// the caller, so a failure to record the status must not replace it.
async fn mark_error(pool: &SqlitePool, target_id: i64) {
    if let Err(e) = storage::set_target_status(pool, target_id, TargetStatus::Error).await {
        warn!("failed to record error status for target {target_id}: {e}");
    }
}
