// file: src/models/search_result.rs
// description: Search result record returned by the deep-search endpoint
// reference: wire contract of POST /api/deep-search

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Relative page path, formatted "<dir>/<id>.json"
    pub filename: String,

    /// Human-readable caption for the matched page
    pub explanation: String,
}

impl SearchResult {
    /// Create a new search result
    pub fn new(filename: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            explanation: explanation.into(),
        }
    }

    /// Whether the filename follows the "<dir>/<id>.json" page path pattern
    pub fn has_valid_filename(&self) -> bool {
        let mut parts = self.filename.splitn(2, '/');
        let dir = parts.next().unwrap_or("");
        let file = parts.next().unwrap_or("");

        !dir.is_empty()
            && dir.chars().all(|c| c.is_ascii_digit())
            && file
                .strip_suffix(".json")
                .is_some_and(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()))
    }
}
