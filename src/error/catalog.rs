//! Catalog error module.
//!
//! Errors raised by catalog sources while fetching or decoding the product list.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching a product catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file does not exist.
    #[error("Catalog file not found: {0}")]
    NotFound(PathBuf),

    /// The catalog could not be read from its source.
    #[error("Failed to read catalog from {source_name}: {message}")]
    Read {
        /// Label of the source that failed
        source_name: String,
        /// Underlying failure
        message: String,
    },

    /// The catalog payload is not a JSON array of products.
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
