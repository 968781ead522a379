//! Book library management.
//!
//! # Storage Layout
//!
//! ```text
//! ~/.bookshelf/
//! └── books.json      # Array of books, rewritten on every change
//! ```
//!
//! The location can be moved with `BOOKSHELF_HOME`, `BOOKSHELF_DATA` or a
//! `.bookshelf/config.yaml` found in the current directory or one of its
//! parents (see `config`).

pub mod catalog;
pub mod store;

pub use catalog::{Catalog, Summary};
pub use store::CatalogStore;
