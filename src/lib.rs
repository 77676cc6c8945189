//! page_audit library: page analysis engine
//!
//! This library tracks web pages ("targets"), fetches their HTML, extracts
//! structural signals (HTML version, title, heading counts, login-form
//! presence), and classifies and probes every outbound link. Each completed
//! run produces a durable analysis record in a SQLite database, and target
//! status transitions (`queued` → `running` → `done`/`error`/`stopped`) are
//! persisted immediately so concurrent observers always see live state.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use page_audit::engine::{run_analysis, EngineContext, RunOutcome};
//! use page_audit::initialization::{init_page_client, init_probe_client};
//! use page_audit::storage::{create_target, init_db_pool_with_path, init_schema};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = init_db_pool_with_path(std::path::Path::new("./page_audit.db")).await?;
//! init_schema(&pool).await?;
//!
//! let target = create_target(&pool, "https://example.com").await?;
//! let ctx = EngineContext {
//!     pool: Arc::clone(&pool),
//!     page_client: init_page_client(10)?,
//!     probe_client: init_probe_client()?,
//! };
//!
//! match run_analysis(&ctx, target.id).await? {
//!     RunOutcome::Completed(summary) => println!(
//!         "{} internal, {} external, {} broken",
//!         summary.internal_links, summary.external_links, summary.broken_links
//!     ),
//!     RunOutcome::Stopped => println!("run was stopped"),
//!     RunOutcome::AlreadyRunning => println!("a run is already in flight"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod config;
pub mod engine;
pub mod error_handling;
pub mod initialization;
pub mod links;
pub mod models;
pub mod parse;
pub mod storage;

// Re-export the items most callers need.
pub use engine::{run_analysis, start_analysis, EngineContext, RunOutcome, RunSummary};
pub use error_handling::{DatabaseError, EngineError, InitializationError};
pub use models::{AnalysisRecord, AnalysisResult, HeadingCounts, Link, Target, TargetStatus};
