// file: src/search/mod.rs
// description: search data-source module exports
// reference: internal module structure

pub mod source;

pub use source::{FixtureSource, ResultSource};
