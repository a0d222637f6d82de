// file: src/search/source.rs
// description: swappable result source trait and the hardcoded mock fixture
// reference: https://docs.rs/async-trait

use crate::error::{AppError, Result};
use crate::models::SearchResult;
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

/// Boundary between the endpoint and whatever produces results.
///
/// The only implementation today is [`FixtureSource`]; a real search engine
/// replaces this trait's implementation, not the endpoint.
#[async_trait]
pub trait ResultSource: Send + Sync {
    /// Return the results for `query`, best match first.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
}

/// Mock source returning a fixed result list regardless of the query.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    results: Vec<SearchResult>,
}

impl FixtureSource {
    /// Source backed by the built-in canonical fixture.
    pub fn new() -> Self {
        Self {
            results: builtin_fixture(),
        }
    }

    /// Source backed by a JSON file holding an array of results, so the
    /// placeholder data can be swapped without a rebuild.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| AppError::Fixture {
            path: path.to_path_buf(),
            source,
        })?;

        let results: Vec<SearchResult> = serde_json::from_str(&raw)?;
        Ok(Self { results })
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResultSource for FixtureSource {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        debug!("Serving fixture results for query: {}", query);
        Ok(self.results.clone())
    }
}

/// The canonical mock result list. Order is part of the contract.
fn builtin_fixture() -> Vec<SearchResult> {
    vec![
        SearchResult::new("18/116.json", "Intimate portrait of a woman sleeping"),
        SearchResult::new("18/118.json", "Intimate portrait of a woman sleeping"),
        SearchResult::new("8/31.json", "Three portraits of a sleeping person"),
        SearchResult::new("6/119.json", "Two portraits of someone sleeping"),
        SearchResult::new("4/152.json", "Side portrait of a young woman"),
    ]
}
