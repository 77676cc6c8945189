//! Resolver tests. Probe behavior is covered by the integration tests, which
//! run against a loopback HTTP server.

use super::*;

const BASE: &str = "https://example.com";

#[test]
fn slash_reference_is_internal() {
    let resolved = resolve_reference("/about", BASE);
    assert!(resolved.internal);
    assert_eq!(resolved.url, "https://example.com/about");
}

#[test]
fn slash_reference_is_internal_even_with_external_looking_path() {
    let resolved = resolve_reference("/https://other.com", BASE);
    assert!(resolved.internal);
    assert_eq!(resolved.url, "https://example.com/https://other.com");
}

#[test]
fn base_prefixed_reference_is_internal_and_kept_as_is() {
    let resolved = resolve_reference("https://example.com/docs", BASE);
    assert!(resolved.internal);
    assert_eq!(resolved.url, "https://example.com/docs");
}

#[test]
fn other_origin_is_external_and_kept_as_is() {
    let resolved = resolve_reference("https://other.com/x", BASE);
    assert!(!resolved.internal);
    assert_eq!(resolved.url, "https://other.com/x");
}

#[test]
fn classification_ignores_reachability() {
    // Lexical rule only: an unreachable host is still external.
    let resolved = resolve_reference("http://definitely-not-reachable.invalid/x", BASE);
    assert!(!resolved.internal);
    assert_eq!(resolved.url, "http://definitely-not-reachable.invalid/x");
}

#[test]
fn bare_relative_reference_gets_separator_inserted() {
    let resolved = resolve_reference("pricing", BASE);
    assert!(!resolved.internal);
    assert_eq!(resolved.url, "https://example.com/pricing");
}

#[test]
fn mailto_reference_is_external_and_concatenated() {
    let resolved = resolve_reference("mailto:x@x.com", BASE);
    assert!(!resolved.internal);
    assert_eq!(resolved.url, "https://example.com/mailto:x@x.com");
}
