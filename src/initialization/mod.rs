//! Initialization for shared resources.
//!
//! Logger and HTTP client construction lives here so the binary and tests
//! build them the same way.

mod client;
mod logger;

pub use client::{init_page_client, init_probe_client};
pub use logger::init_logger_with;
