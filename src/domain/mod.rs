//! Domain types for the book catalog.
//!
//! - Book: One catalog entry
//! - BookRecord: Its on-disk shape
//! - CatalogError: Every way a catalog operation can fail

pub mod book;
pub mod error;

// Re-export commonly used types
pub use book::{validate_rating, Book, BookRecord, MAX_RATING, MIN_RATING};
pub use error::CatalogError;
