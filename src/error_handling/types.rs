//! Error type definitions.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing an HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// The requested target does not exist.
    #[error("target {0} not found")]
    TargetNotFound(i64),

    /// The address is already tracked by another target.
    #[error("address already tracked: {0}")]
    DuplicateAddress(String),

    /// A stored status string did not match any known target status.
    #[error("unrecognized target status '{0}' in store")]
    InvalidStatus(String),

    /// Heading counts could not be serialized to or from their JSON column.
    #[error("heading counts serialization error: {0}")]
    HeadingsCodec(#[from] serde_json::Error),
}

/// Errors terminal to a single analysis run.
///
/// Each variant maps to one phase of the run. By the time one of these is
/// returned, the target's status has already been set to `error` (or the
/// status write itself failed and was logged), so external observers never
/// see a stale `running` state.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Reading or writing the target record failed.
    #[error("target store error: {0}")]
    Store(#[from] DatabaseError),

    /// The initial page GET failed (network, DNS, timeout).
    #[error("failed to fetch {address}: {source}")]
    Fetch {
        /// Address of the page that could not be fetched.
        address: String,
        /// Underlying transport error.
        source: ReqwestError,
    },

    /// The response body could not be read as markup.
    #[error("failed to read page body from {address}: {source}")]
    Parse {
        /// Address of the page whose body could not be read.
        address: String,
        /// Underlying body/decode error.
        source: ReqwestError,
    },

    /// Writing the finished analysis result failed.
    #[error("failed to persist analysis result for target {target_id}: {source}")]
    Persist {
        /// Target the result belonged to.
        target_id: i64,
        /// Underlying database error.
        source: DatabaseError,
    },
}
