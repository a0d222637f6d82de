// file: src/models/request.rs
// description: Request and error payloads for the deep-search endpoint
// reference: wire contract of POST /api/deep-search

use serde::{Deserialize, Serialize};

/// Body of a deep-search request. The query is parsed but does not influence
/// the mock response; the endpoint is a constant mapping by design.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// Generic failure body. One message covers every error kind; the cause is
/// logged server-side only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn deep_search_failed() -> Self {
        Self {
            error: "Failed to perform deep search".to_string(),
        }
    }
}
