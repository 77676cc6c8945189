//! HTML extraction.
//!
//! Turns a fetched page body into a [`PageReport`]: HTML-version signal,
//! title, heading counts, the ordered anchor list, and login-form presence.
//! Extraction is best-effort; malformed markup never raises an error, it just
//! yields a sparser report. A body that cannot be read at all is handled one
//! level up, in the engine.

use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::models::HeadingCounts;

#[cfg(test)]
mod tests;

// Literal selectors, parsed once.
static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("literal selector"));
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("literal selector"));
static HEADING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").expect("literal selector"));
static FORM_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("form").expect("literal selector"));
static PASSWORD_INPUT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("input[type='password']").expect("literal selector"));
static HTML_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("html").expect("literal selector"));

/// Structural signals extracted from one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    /// "HTML5", "HTML4 or older", or "unknown".
    pub html_version: String,
    /// Text of the first `<title>` element, empty string if absent.
    pub title: String,
    /// Per-level heading counts.
    pub headings: HeadingCounts,
    /// Raw `href` values of every anchor, in document order.
    pub anchors: Vec<String>,
    /// True if any `<form>` contains a descendant password input.
    pub login_form: bool,
}

/// Parses a page body and extracts all structural signals.
pub fn parse_page(body: &str) -> PageReport {
    let document = Html::parse_document(body);

    let report = PageReport {
        html_version: classify_html_version(&document).to_string(),
        title: extract_title(&document),
        headings: count_headings(&document),
        anchors: extract_anchors(&document),
        login_form: detect_login_form(&document),
    };
    log::debug!(
        "parsed page: version={}, {} headings, {} anchors, login_form={}",
        report.html_version,
        report.headings.total(),
        report.anchors.len(),
        report.login_form
    );
    report
}

/// Classifies the HTML version from the parsed tree.
///
/// A doctype node named `html` with no public or system identifier is the
/// HTML5 marker. An `<html>` element without that marker classifies as
/// "HTML4 or older" (legacy doctypes carry public/system identifiers, and
/// the parser inserts `<html>` even when the source omits it). "unknown" is
/// the fallback when not even an `<html>` element exists.
fn classify_html_version(document: &Html) -> &'static str {
    let html5_doctype = document.tree.nodes().any(|node| {
        node.value().as_doctype().is_some_and(|doctype| {
            doctype.name().eq_ignore_ascii_case("html")
                && doctype.public_id().is_empty()
                && doctype.system_id().is_empty()
        })
    });
    if html5_doctype {
        "HTML5"
    } else if document.select(&HTML_SELECTOR).next().is_some() {
        "HTML4 or older"
    } else {
        "unknown"
    }
}

/// Text content of the first `<title>` element, trimmed; empty if absent.
fn extract_title(document: &Html) -> String {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn count_headings(document: &Html) -> HeadingCounts {
    let mut counts = HeadingCounts::default();
    for element in document.select(&HEADING_SELECTOR) {
        // Selector guarantees names h1..h6.
        if let Some(level) = element.value().name().strip_prefix('h') {
            if let Ok(level) = level.parse::<u8>() {
                counts.record(level);
            }
        }
    }
    counts
}

/// Raw `href` values of all anchors, in document order.
fn extract_anchors(document: &Html) -> Vec<String> {
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// True if any form contains a descendant `input[type='password']`.
fn detect_login_form(document: &Html) -> bool {
    document
        .select(&FORM_SELECTOR)
        .any(|form| form.select(&PASSWORD_INPUT_SELECTOR).next().is_some())
}
