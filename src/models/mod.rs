// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod request;
pub mod search_result;

pub use request::{ErrorResponse, SearchRequest};
pub use search_result::SearchResult;
