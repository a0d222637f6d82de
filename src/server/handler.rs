// file: src/server/handler.rs
// description: routing and the deep-search request handler
// reference: POST /api/deep-search wire contract

use crate::error::Result;
use crate::models::{ErrorResponse, SearchRequest};
use crate::search::ResultSource;
use crate::server::http::{HttpRequest, build_response};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

const DEEP_SEARCH_PATH: &str = "/api/deep-search";

/// Handles routed requests against the result source.
///
/// The artificial delay simulates a slow search so the UI's pending state can
/// be exercised; it is a fixed, non-blocking suspension and runs to completion
/// even if the client disconnects, since nothing observes cancellation.
pub struct DeepSearchHandler {
    source: Arc<dyn ResultSource>,
    delay: Duration,
}

impl DeepSearchHandler {
    pub fn new(source: Arc<dyn ResultSource>, delay: Duration) -> Self {
        Self { source, delay }
    }

    /// Route one request and produce the full response bytes.
    pub async fn handle(&self, request: &HttpRequest) -> Vec<u8> {
        if request.path != DEEP_SEARCH_PATH {
            return json_response(404, &ErrorResponse {
                error: "Not found".to_string(),
            });
        }
        if request.method != "POST" {
            return json_response(405, &ErrorResponse {
                error: "Method not allowed".to_string(),
            });
        }

        match self.deep_search(&request.body).await {
            Ok(body) => build_response(200, "application/json", body),
            Err(e) => {
                // One generic payload for every failure kind; only the log
                // distinguishes a malformed body from an internal error.
                error!("Deep search error: {}", e);
                json_response(500, &ErrorResponse::deep_search_failed())
            }
        }
    }

    async fn deep_search(&self, body: &[u8]) -> Result<Vec<u8>> {
        let request: SearchRequest = serde_json::from_slice(body)?;
        debug!("Deep search request, query: {}", request.query);

        // Simulated search latency
        tokio::time::sleep(self.delay).await;

        let results = self.source.search(&request.query).await?;
        Ok(serde_json::to_vec(&results)?)
    }
}

fn json_response<T: Serialize>(status: u16, payload: &T) -> Vec<u8> {
    // Serializing our own payload types cannot fail
    let body = serde_json::to_vec(payload).unwrap_or_default();
    build_response(status, "application/json", body)
}
