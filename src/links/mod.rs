//! Link resolution and liveness probing.
//!
//! The resolver is purely lexical: it classifies a raw anchor reference as
//! internal or external relative to the page's base address and produces a
//! best-effort absolute URL, without parsing URL components. The prober
//! issues a single GET per resolved URL with a short timeout and a crawler
//! User-Agent; its outcome is recorded, never propagated as an error.

use reqwest::header::USER_AGENT;
use reqwest::Client;

use crate::config::PROBE_USER_AGENT;
use crate::models::Link;

#[cfg(test)]
mod tests;

/// A resolved anchor reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    /// Best-effort absolute URL for probing.
    pub url: String,
    /// Whether the reference points inside the page's own origin.
    pub internal: bool,
}

/// Resolves a raw anchor reference against a page's base address.
///
/// `base` must already have its trailing slash stripped. A reference is
/// internal if it begins with `/` or textually starts with the base address.
/// If the reference already carries a scheme (begins with `http`) it is used
/// as-is; otherwise it is concatenated onto the base, inserting a `/` only
/// when the reference does not start with one. Always succeeds.
pub fn resolve_reference(href: &str, base: &str) -> ResolvedReference {
    let internal = href.starts_with('/') || href.starts_with(base);

    let url = if href.starts_with("http") {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{base}{href}")
    } else {
        format!("{base}/{href}")
    };

    ResolvedReference { url, internal }
}

/// Outcome of probing one resolved URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Observed HTTP status; 0 when the request could not be completed.
    pub http_status: i64,
    /// True for transport failures and responses with status >= 400.
    pub broken: bool,
}

/// Issues a single GET against a resolved URL and reports liveness.
///
/// One attempt is authoritative for the run: no retries. A transport failure
/// (DNS, connection refused, timeout) or a malformed URL yields status 0.
pub async fn probe_link(client: &Client, url: &str) -> ProbeOutcome {
    match client
        .get(url)
        .header(USER_AGENT, PROBE_USER_AGENT)
        .send()
        .await
    {
        Ok(response) => {
            let status = response.status().as_u16() as i64;
            ProbeOutcome {
                http_status: status,
                broken: status >= 400,
            }
        }
        Err(e) => {
            log::debug!("probe failed for {url}: {e}");
            ProbeOutcome {
                http_status: 0,
                broken: true,
            }
        }
    }
}

/// Aggregated outcome of the link-verification phase.
#[derive(Debug, Default, Clone)]
pub struct LinkVerification {
    /// Per-link outcomes, in document order.
    pub links: Vec<Link>,
    /// Links classified internal.
    pub internal: i64,
    /// Links classified external.
    pub external: i64,
    /// Links marked broken.
    pub broken: i64,
}

/// Resolves and probes every anchor, accumulating counts and link records.
///
/// Probes run sequentially so the persisted link order is document order.
/// Individual probe failures are recorded on their link and never abort the
/// phase.
pub async fn verify_links(client: &Client, base: &str, anchors: &[String]) -> LinkVerification {
    let mut verification = LinkVerification::default();

    for href in anchors {
        let resolved = resolve_reference(href, base);
        let outcome = probe_link(client, &resolved.url).await;

        if resolved.internal {
            verification.internal += 1;
        } else {
            verification.external += 1;
        }
        if outcome.broken {
            verification.broken += 1;
        }

        verification.links.push(Link {
            href: href.clone(),
            internal: resolved.internal,
            broken: outcome.broken,
            http_status: outcome.http_status,
        });
    }

    verification
}
