//! bookshelf - Personal book catalog
//!
//! Keeps a list of books with read status and ratings in a local JSON file.
//!
//! # Architecture
//!
//! - Every book lives in a single [`Catalog`], in insertion order
//! - The catalog validates each change before applying it
//! - Every successful change rewrites the whole file
//!
//! # Modules
//!
//! - `domain`: Data structures (Book, BookRecord, CatalogError)
//! - `library`: The catalog and its file store
//! - `config`: Where the catalog file lives
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! bookshelf add 9788535914849 --title "Dom Casmurro" --author "Machado de Assis" --year 1899
//! bookshelf read 9788535914849
//! bookshelf rate 9788535914849 5
//! bookshelf list --min-rating 4
//! bookshelf summary
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod library;

// Re-export main types at crate root for convenience
pub use domain::{Book, BookRecord, CatalogError};
pub use library::{Catalog, CatalogStore, Summary};
