// Shared test helpers: database setup, sample records, and a loopback HTTP
// server that serves canned responses for fetch/probe tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use page_audit::models::{AnalysisRecord, HeadingCounts, Link};
use page_audit::storage::{init_memory_pool, init_schema};

/// Creates an in-memory database pool with the schema applied.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_pool() -> Arc<SqlitePool> {
    let pool = init_memory_pool().await.expect("create test pool");
    init_schema(&pool).await.expect("init schema");
    pool
}

/// A minimal but realistic analysis record for storage tests.
#[allow(dead_code)]
pub fn sample_record() -> AnalysisRecord {
    AnalysisRecord {
        html_version: "HTML5".to_string(),
        title: "Sample".to_string(),
        headings: HeadingCounts {
            h1: 1,
            h2: 2,
            ..Default::default()
        },
        internal_links: 1,
        external_links: 1,
        broken_links: 1,
        login_form: false,
        created_at_ms: 1_704_067_200_000,
        links: vec![
            Link {
                href: "/about".to_string(),
                internal: true,
                broken: false,
                http_status: 200,
            },
            Link {
                href: "https://other.com/x".to_string(),
                internal: false,
                broken: true,
                http_status: 404,
            },
        ],
    }
}

/// A canned response served by the test HTTP server.
pub struct Route {
    pub status: u16,
    pub body: String,
    pub delay_ms: u64,
}

#[allow(dead_code)]
impl Route {
    pub fn html(body: &str) -> Self {
        Route {
            status: 200,
            body: body.to_string(),
            delay_ms: 0,
        }
    }

    pub fn status(status: u16) -> Self {
        Route {
            status,
            body: String::new(),
            delay_ms: 0,
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

/// Spawns a loopback HTTP server that answers from the route table.
///
/// Unknown paths get a 404. The listener task lives until the test runtime
/// shuts down.
#[allow(dead_code)]
pub async fn spawn_http_server(routes: HashMap<String, Route>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("test server addr");
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let routes = Arc::clone(&routes);
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let mut read_total = 0usize;
                loop {
                    match socket.read(&mut buf[read_total..]).await {
                        Ok(0) => break,
                        Ok(n) => {
                            read_total += n;
                            if buf[..read_total].windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                            if read_total == buf.len() {
                                break;
                            }
                        }
                        Err(_) => return,
                    }
                }

                let request = String::from_utf8_lossy(&buf[..read_total]);
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();

                let (status, body, delay_ms) = match routes.get(&path) {
                    Some(route) => (route.status, route.body.clone(), route.delay_ms),
                    None => (404, "not found".to_string(), 0),
                };

                if delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }

                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason_phrase(status),
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}
