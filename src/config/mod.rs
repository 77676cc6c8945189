//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, probe headers, database path)
//! - CLI option types (log level/format)

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{LogFormat, LogLevel};
