//! Integration tests for the deep-search HTTP server.
//!
//! Each test binds the real server on an ephemeral port, drives it with a
//! real HTTP client, and shuts it down through the watch channel.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test server_integration
//! ```

use anyhow::Result;
use deep_search::{Config, DeepSearchServer, SearchResult};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::watch;

// ============================================
// Test Helpers
// ============================================

/// Bind the server on an ephemeral port and serve it in a background task.
///
/// The returned sender keeps the server alive; sending `true` (or dropping
/// it) shuts the server down.
async fn spawn_server(
    delay_ms: u64,
    fixture_path: Option<PathBuf>,
) -> Result<(SocketAddr, watch::Sender<bool>)> {
    let mut config = Config::default_config();
    config.server.port = 0;
    config.server.delay_ms = delay_ms;
    config.search.fixture_path = fixture_path;

    let server = DeepSearchServer::bind(&config).await?;
    let addr = server.local_addr()?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        let _ = server.run_until(shutdown_rx).await;
    });

    Ok((addr, shutdown_tx))
}

fn endpoint(addr: SocketAddr) -> String {
    format!("http://{addr}/api/deep-search")
}

async fn post_query(addr: SocketAddr, query: &str) -> Result<reqwest::Response> {
    let response = reqwest::Client::new()
        .post(endpoint(addr))
        .json(&serde_json::json!({ "query": query }))
        .send()
        .await?;
    Ok(response)
}

// ============================================
// Endpoint Tests
// ============================================

#[tokio::test]
async fn deep_search_returns_canonical_fixture() -> Result<()> {
    let (addr, _shutdown) = spawn_server(0, None).await?;

    let response = post_query(addr, "anything").await?;
    assert_eq!(response.status(), 200);

    let results: Vec<SearchResult> = response.json().await?;
    assert_eq!(results.len(), 5);
    assert_eq!(
        results[0],
        SearchResult::new("18/116.json", "Intimate portrait of a woman sleeping")
    );

    Ok(())
}

#[tokio::test]
async fn response_is_identical_regardless_of_query() -> Result<()> {
    let (addr, _shutdown) = spawn_server(0, None).await?;

    let first: Vec<SearchResult> = post_query(addr, "sleeping woman").await?.json().await?;
    let second: Vec<SearchResult> = post_query(addr, "0xDEADBEEF").await?.json().await?;

    assert_eq!(first, second);

    Ok(())
}

#[tokio::test]
async fn malformed_body_returns_500_with_error_key() -> Result<()> {
    let (addr, _shutdown) = spawn_server(0, None).await?;

    let response = reqwest::Client::new()
        .post(endpoint(addr))
        .header("content-type", "application/json")
        .body("this is not json")
        .send()
        .await?;

    assert_eq!(response.status(), 500);

    let payload: serde_json::Value = response.json().await?;
    assert_eq!(payload["error"], "Failed to perform deep search");

    Ok(())
}

#[tokio::test]
async fn wrong_method_is_rejected() -> Result<()> {
    let (addr, _shutdown) = spawn_server(0, None).await?;

    let response = reqwest::Client::new().get(endpoint(addr)).send().await?;
    assert_eq!(response.status(), 405);

    Ok(())
}

#[tokio::test]
async fn unknown_path_is_rejected() -> Result<()> {
    let (addr, _shutdown) = spawn_server(0, None).await?;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/shallow-search"))
        .json(&serde_json::json!({ "query": "x" }))
        .send()
        .await?;
    assert_eq!(response.status(), 404);

    Ok(())
}

#[tokio::test]
async fn response_waits_for_the_configured_delay() -> Result<()> {
    let (addr, _shutdown) = spawn_server(200, None).await?;

    let started = Instant::now();
    let response = post_query(addr, "anything").await?;
    let elapsed = started.elapsed();

    assert_eq!(response.status(), 200);
    assert!(
        elapsed >= Duration::from_millis(200),
        "responded after {elapsed:?}, expected at least 200ms"
    );

    Ok(())
}

#[tokio::test]
async fn fixture_file_overrides_builtin_results() -> Result<()> {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"[{{"filename":"3/9.json","explanation":"Charcoal study of a dancer"}}]"#
    )?;

    let (addr, _shutdown) = spawn_server(0, Some(file.path().to_path_buf())).await?;

    let results: Vec<SearchResult> = post_query(addr, "anything").await?.json().await?;
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0],
        SearchResult::new("3/9.json", "Charcoal study of a dancer")
    );

    Ok(())
}

#[tokio::test]
async fn server_stops_on_shutdown_signal() -> Result<()> {
    let (addr, shutdown) = spawn_server(0, None).await?;

    // Server answers before shutdown
    assert_eq!(post_query(addr, "x").await?.status(), 200);

    shutdown.send(true)?;
    tokio::time::sleep(Duration::from_millis(50)).await;

    // And refuses connections after
    let connect = tokio::net::TcpStream::connect(addr).await;
    assert!(connect.is_err(), "listener should be closed after shutdown");

    Ok(())
}
