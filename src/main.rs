//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `page_audit` library: command parsing,
//! logger setup, and user-facing output. All analysis and persistence logic
//! lives in the library crate. Because state is durable, subcommands compose
//! across invocations — `stop` issued from a second terminal is observed by
//! an `analyze` already in flight against the same database.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use page_audit::config::{LogFormat, LogLevel, DB_PATH, DEFAULT_FETCH_TIMEOUT_SECS};
use page_audit::engine::{run_analysis, EngineContext, RunOutcome};
use page_audit::initialization::{init_logger_with, init_page_client, init_probe_client};
use page_audit::storage;

#[derive(Parser)]
#[command(
    name = "page_audit",
    about = "Tracks web pages, extracts structural signals, and verifies their outbound links"
)]
struct Cli {
    /// SQLite database path
    #[arg(long, default_value = DB_PATH)]
    db: PathBuf,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    log_format: LogFormat,

    /// Timeout in seconds for the initial page fetch
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    timeout_seconds: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a page address for analysis
    Add {
        /// Page address (e.g. https://example.com)
        address: String,
    },
    /// List all tracked targets and their statuses
    List,
    /// Show one target with its persisted analysis results
    Show {
        /// Target id
        id: i64,
    },
    /// Run an analysis against a target and wait for it to finish
    Analyze {
        /// Target id
        id: i64,
    },
    /// Request that an in-flight run stop at its next checkpoint
    Stop {
        /// Target id
        id: i64,
    },
    /// Change a target's address, discarding its previous results
    SetAddress {
        /// Target id
        id: i64,
        /// New page address
        address: String,
    },
    /// Delete a target and all its results
    Delete {
        /// Target id
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    let pool = storage::init_db_pool_with_path(&cli.db)
        .await
        .context("Failed to initialize database pool")?;
    storage::init_schema(&pool)
        .await
        .context("Failed to initialize database schema")?;

    match run_command(cli, pool).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("page_audit error: {:#}", e);
            process::exit(1);
        }
    }
}

async fn run_command(cli: Cli, pool: Arc<sqlx::SqlitePool>) -> Result<()> {
    match cli.command {
        Command::Add { address } => {
            let target = storage::create_target(&pool, &address).await?;
            println!("Added target {} ({})", target.id, target.address);
        }
        Command::List => {
            let targets = storage::list_targets(&pool).await?;
            if targets.is_empty() {
                println!("No targets tracked yet.");
            }
            for target in targets {
                println!("{:>4}  {:<8}  {}", target.id, target.status, target.address);
            }
        }
        Command::Show { id } => {
            let target = storage::get_target(&pool, id).await?;
            let results = storage::list_results(&pool, id).await?;
            println!("{}", serde_json::to_string_pretty(&target)?);
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Command::Analyze { id } => {
            let ctx = EngineContext {
                pool: Arc::clone(&pool),
                page_client: init_page_client(cli.timeout_seconds)?,
                probe_client: init_probe_client()?,
            };
            match run_analysis(&ctx, id).await? {
                RunOutcome::Completed(summary) => {
                    println!(
                        "Analysis complete: {} internal, {} external, {} broken link{} (result {})",
                        summary.internal_links,
                        summary.external_links,
                        summary.broken_links,
                        if summary.broken_links == 1 { "" } else { "s" },
                        summary.result_id
                    );
                }
                RunOutcome::Stopped => println!("Analysis stopped before completion."),
                RunOutcome::AlreadyRunning => {
                    println!("Target {id} already has a run in flight.")
                }
            }
        }
        Command::Stop { id } => {
            let status = storage::request_stop(&pool, id).await?;
            println!("Target {id} status: {status}");
        }
        Command::SetAddress { id, address } => {
            let target = storage::update_target_address(&pool, id, &address).await?;
            println!(
                "Target {} now tracks {} (status: {})",
                target.id, target.address, target.status
            );
        }
        Command::Delete { id } => {
            storage::delete_target(&pool, id).await?;
            println!("Deleted target {id} and its results.");
        }
    }
    Ok(())
}
