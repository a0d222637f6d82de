// file: src/server/mod.rs
// description: tokio TCP accept loop serving the deep-search endpoint
// reference: https://docs.rs/tokio (net, signal, sync::watch)

pub mod handler;
pub mod http;

pub use handler::DeepSearchHandler;
pub use http::{HttpRequest, build_response, read_request};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::search::{FixtureSource, ResultSource};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// A bound server, ready to run.
///
/// Binding is split from running so callers (and tests) can bind port 0 and
/// read the actual address before serving.
pub struct DeepSearchServer {
    listener: TcpListener,
    handler: Arc<DeepSearchHandler>,
}

impl DeepSearchServer {
    /// Bind the configured address and build the handler, loading the fixture
    /// override file when one is configured.
    pub async fn bind(config: &Config) -> Result<Self> {
        let source: Arc<dyn ResultSource> = match &config.search.fixture_path {
            Some(path) => {
                info!("Loading fixture override from {}", path.display());
                Arc::new(FixtureSource::from_file(path)?)
            }
            None => Arc::new(FixtureSource::new()),
        };

        let addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| AppError::Bind { addr, source })?;

        let handler = Arc::new(DeepSearchHandler::new(
            source,
            Duration::from_millis(config.server.delay_ms),
        ));

        Ok(Self { listener, handler })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until Ctrl+C.
    pub async fn run(self) -> Result<()> {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        tokio::spawn(async move {
            if let Ok(()) = tokio::signal::ctrl_c().await {
                info!("Shutting down deep-search server");
                let _ = shutdown_tx.send(true);
            }
        });

        self.run_until(shutdown_rx).await
    }

    /// Serve until the shutdown channel flips to true.
    pub async fn run_until(self, mut shutdown_rx: watch::Receiver<bool>) -> Result<()> {
        info!("Deep-search server listening on {}", self.local_addr()?);

        loop {
            tokio::select! {
                result = self.listener.accept() => {
                    match result {
                        Ok((stream, peer)) => {
                            let handler = Arc::clone(&self.handler);
                            tokio::spawn(async move {
                                handle_connection(stream, peer, handler).await;
                            });
                        }
                        Err(e) => {
                            warn!("Failed to accept connection: {}", e);
                        }
                    }
                }
                changed = shutdown_rx.changed() => {
                    // A dropped sender also stops the server
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        Ok(())
    }
}

async fn handle_connection(
    mut stream: tokio::net::TcpStream,
    peer: SocketAddr,
    handler: Arc<DeepSearchHandler>,
) {
    let response = match read_request(&mut stream).await {
        Ok(request) => {
            debug!("{} {} {}", peer, request.method, request.path);
            handler.handle(&request).await
        }
        Err(e) => {
            debug!("Unreadable request from {}: {}", peer, e);
            build_response(400, "text/plain", b"Bad Request".to_vec())
        }
    };

    if let Err(e) = stream.write_all(&response).await {
        debug!("Failed to write response to {}: {}", peer, e);
    }
    let _ = stream.shutdown().await;
}
