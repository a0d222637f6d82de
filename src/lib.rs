// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod highlight;
pub mod models;
pub mod search;
pub mod server;
pub mod utils;

pub use config::{Config, SearchConfig, ServerConfig};
pub use error::{AppError, Result};
pub use highlight::{Highlighter, MatchMode, highlight};
pub use models::{ErrorResponse, SearchRequest, SearchResult};
pub use search::{FixtureSource, ResultSource};
pub use server::{DeepSearchHandler, DeepSearchServer};
