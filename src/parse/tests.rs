//! Parse module tests.

use super::*;

#[test]
fn extracts_title_text() {
    let report = parse_page(r#"<html><head><title>Test Page</title></head><body></body></html>"#);
    assert_eq!(report.title, "Test Page");
}

#[test]
fn title_is_trimmed() {
    let report = parse_page("<html><head><title>\n  Test Page \n</title></head></html>");
    assert_eq!(report.title, "Test Page");
}

#[test]
fn missing_title_yields_empty_string() {
    let report = parse_page(r#"<html><body><h1>Heads</h1><h2>a</h2><h2>b</h2></body></html>"#);
    assert_eq!(report.title, "");
    assert_eq!(report.headings.h1, 1);
    assert_eq!(report.headings.h2, 2);
    assert_eq!(report.headings.h3, 0);
}

#[test]
fn counts_headings_per_level() {
    let report = parse_page(
        r#"<html><body>
            <h1>one</h1>
            <h2>two</h2><h2>two again</h2>
            <h6>deep</h6>
        </body></html>"#,
    );
    assert_eq!(report.headings.h1, 1);
    assert_eq!(report.headings.h2, 2);
    assert_eq!(report.headings.h6, 1);
    assert_eq!(report.headings.total(), 4);
}

#[test]
fn anchors_keep_document_order_and_raw_hrefs() {
    let report = parse_page(
        r#"<html><body>
            <a href="/about">About</a>
            <a href="https://other.com/x">Other</a>
            <a name="no-href">skipped</a>
            <a href="mailto:x@x.com">Mail</a>
        </body></html>"#,
    );
    assert_eq!(
        report.anchors,
        vec!["/about", "https://other.com/x", "mailto:x@x.com"]
    );
}

#[test]
fn detects_login_form_via_password_input() {
    let with_login = parse_page(
        r#"<html><body><form><input type="text"><input type="password"></form></body></html>"#,
    );
    assert!(with_login.login_form);

    let search_only = parse_page(
        r#"<html><body><form><input type="search" name="q"></form></body></html>"#,
    );
    assert!(!search_only.login_form);

    // A password input outside any form does not count as a login form.
    let stray_input = parse_page(r#"<html><body><input type="password"></body></html>"#);
    assert!(!stray_input.login_form);
}

#[test]
fn html5_doctype_classifies_as_html5() {
    let report = parse_page("<!DOCTYPE html><html><head></head><body></body></html>");
    assert_eq!(report.html_version, "HTML5");
}

#[test]
fn legacy_doctype_classifies_as_html4_or_older() {
    let report = parse_page(
        r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">
        <html><body></body></html>"#,
    );
    assert_eq!(report.html_version, "HTML4 or older");
}

#[test]
fn missing_doctype_classifies_as_html4_or_older() {
    let report = parse_page("<html><body><p>bare</p></body></html>");
    assert_eq!(report.html_version, "HTML4 or older");
}

#[test]
fn malformed_markup_still_produces_a_report() {
    let report = parse_page("<<<not <valid <html <a href='/x'");
    assert_eq!(report.title, "");
    assert_eq!(report.headings.total(), 0);
    assert!(!report.login_form);
}
