//! Error types for offerview-core

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the offerview-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Catalog file could not be read or written
    #[error("catalog error in {path}: {message}")]
    Catalog { path: PathBuf, message: String },

    /// Offer not found in a catalog
    #[error("offer not found: {0}")]
    OfferNotFound(String),

    /// Unrecognized layout mode name
    #[error("invalid layout mode: {0}")]
    InvalidLayoutMode(String),
}

/// Result type alias for offerview-core
pub type Result<T> = std::result::Result<T, Error>;
