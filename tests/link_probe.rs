//! Probe behavior against a loopback HTTP server: status capture, broken
//! marking, and aggregate counting in the verification phase.

mod helpers;

use std::collections::HashMap;

use helpers::{spawn_http_server, Route};
use page_audit::initialization::init_probe_client;
use page_audit::links::{probe_link, verify_links};

#[tokio::test]
async fn probe_records_success_status() {
    let mut routes = HashMap::new();
    routes.insert("/ok".to_string(), Route::html("<p>fine</p>"));
    let addr = spawn_http_server(routes).await;

    let client = init_probe_client().unwrap();
    let outcome = probe_link(&client, &format!("http://{addr}/ok")).await;
    assert_eq!(outcome.http_status, 200);
    assert!(!outcome.broken);
}

#[tokio::test]
async fn probe_marks_client_error_broken_with_received_code() {
    let addr = spawn_http_server(HashMap::new()).await;

    let client = init_probe_client().unwrap();
    let outcome = probe_link(&client, &format!("http://{addr}/nope")).await;
    assert_eq!(outcome.http_status, 404);
    assert!(outcome.broken);
}

#[tokio::test]
async fn probe_marks_transport_failure_broken_with_status_zero() {
    let client = init_probe_client().unwrap();
    // Port 1 on loopback: connection refused.
    let outcome = probe_link(&client, "http://127.0.0.1:1/x").await;
    assert_eq!(outcome.http_status, 0);
    assert!(outcome.broken);
}

#[tokio::test]
async fn probe_marks_malformed_url_broken_with_status_zero() {
    let client = init_probe_client().unwrap();
    let outcome = probe_link(&client, "http://").await;
    assert_eq!(outcome.http_status, 0);
    assert!(outcome.broken);
}

#[tokio::test]
async fn verification_counts_are_consistent_with_links() {
    let mut routes = HashMap::new();
    routes.insert("/about".to_string(), Route::html("<p>about</p>"));
    let addr = spawn_http_server(routes).await;
    let base = format!("http://{addr}");

    let anchors = vec![
        "/about".to_string(),              // internal, reachable
        "/missing".to_string(),            // internal, 404
        "http://127.0.0.1:1/x".to_string(), // external, refused
    ];

    let client = init_probe_client().unwrap();
    let verification = verify_links(&client, &base, &anchors).await;

    assert_eq!(
        verification.internal + verification.external,
        anchors.len() as i64
    );
    assert!(verification.broken <= anchors.len() as i64);
    assert_eq!(verification.internal, 2);
    assert_eq!(verification.external, 1);
    assert_eq!(verification.broken, 2);

    // Document order preserved, raw hrefs kept.
    let hrefs: Vec<_> = verification.links.iter().map(|l| l.href.as_str()).collect();
    assert_eq!(hrefs, vec!["/about", "/missing", "http://127.0.0.1:1/x"]);
    assert_eq!(verification.links[1].http_status, 404);
    assert_eq!(verification.links[2].http_status, 0);
}
