// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid search pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Fixture file error for {path}: {source}")]
    Fixture {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed request body: {0}")]
    BadRequest(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
