//! Error handling module.
//!
//! Defines the typed errors used across the crate. Fetch, parse, and persist
//! failures are terminal for an analysis run and always update the target's
//! durable status before they propagate; probe failures never appear here
//! because they are recorded per link, not raised.

mod types;

pub use types::{DatabaseError, EngineError, InitializationError};
