//! Configuration constants.
//!
//! This module defines the operational constants used throughout the
//! application: timeouts, the probe identity header, and storage defaults.

use std::time::Duration;

/// Default SQLite database path.
pub const DB_PATH: &str = "./page_audit.db";

/// Default timeout in seconds for the initial page fetch.
///
/// The page fetch uses the plain client; link probes use the dedicated probe
/// client with [`PROBE_TIMEOUT`].
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Timeout for each outbound link probe.
///
/// Probes are single-attempt liveness checks; a short fixed timeout bounds
/// the worst-case duration of the verification phase, which is one sequential
/// round-trip per link.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// User-Agent header sent with every link probe.
///
/// Identifies as a well-known crawler to reduce bot-blocking false positives
/// when verifying outbound links. The initial page fetch deliberately does
/// not send this header.
pub const PROBE_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";
