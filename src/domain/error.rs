//! Error type shared by books and the catalog.

use thiserror::Error;

/// Errors that can occur while building or mutating the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("A book with ISBN {0} already exists")]
    DuplicateIdentifier(String),

    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("Only books that have been read can be rated: {0}")]
    NotRead(String),

    #[error("Rating must be an integer between 1 and 5, got {0}")]
    InvalidRating(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
