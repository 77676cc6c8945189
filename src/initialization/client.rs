//! HTTP client initialization.
//!
//! Two clients with distinct roles: a plain client for the initial page
//! fetch, and a probe client with a fixed short timeout for link liveness
//! checks. The probe identity header is set per request (see
//! [`crate::config::PROBE_USER_AGENT`]), not baked into the client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::PROBE_TIMEOUT;
use crate::error_handling::InitializationError;

/// Initializes the client used for the initial page fetch.
///
/// No identifying header is configured; the page fetch presents itself as a
/// plain default client.
///
/// # Arguments
///
/// * `timeout_seconds` - Request timeout for the page fetch.
pub fn init_page_client(timeout_seconds: u64) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()?;
    Ok(Arc::new(client))
}

/// Initializes the client used for link probes.
///
/// Configured with the fixed probe timeout. A single slow or dead link then
/// costs at most that timeout, which bounds the sequential verification
/// phase at one timeout per link.
pub fn init_probe_client() -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new().timeout(PROBE_TIMEOUT).build()?;
    Ok(Arc::new(client))
}
