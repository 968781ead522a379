//! Catalog of books.
//!
//! Holds the books in insertion order and writes the whole collection back to
//! its store after every successful mutation.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use super::store::CatalogStore;
use crate::domain::{validate_rating, Book, CatalogError};

/// Totals over the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub read: usize,
    pub unread: usize,

    /// Mean rating over read books that have a rating
    pub mean_rating: Option<f64>,
}

/// Catalog of books backed by a JSON file
#[derive(Debug)]
pub struct Catalog {
    store: CatalogStore,
    books: Vec<Book>,
}

impl Catalog {
    /// Open the catalog stored at `path`, loading it if the file exists
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let store = CatalogStore::new(path);
        let books = store.load()?;
        Ok(Self { store, books })
    }

    /// Open the catalog at the configured location
    pub fn open_default() -> anyhow::Result<Self> {
        let path = crate::config::catalog_path()?;
        Ok(Self::open(path)?)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Add a book. The ISBN must not already be in the catalog.
    pub fn add(&mut self, book: Book) -> Result<(), CatalogError> {
        if self.find_by_identifier(book.identifier()).is_some() {
            return Err(CatalogError::DuplicateIdentifier(
                book.identifier().to_string(),
            ));
        }

        info!(identifier = %book.identifier(), title = %book.title(), "Adding book");
        self.books.push(book);
        self.persist()
    }

    /// Remove a book by ISBN, returning it
    pub fn remove(&mut self, identifier: &str) -> Result<Book, CatalogError> {
        let pos = self.position(identifier)?;
        let book = self.books.remove(pos);

        info!(identifier, "Removed book");
        self.persist()?;
        Ok(book)
    }

    pub fn mark_read(&mut self, identifier: &str) -> Result<(), CatalogError> {
        self.set_read(identifier, true)
    }

    /// Mark a book unread. Its rating, if any, is kept.
    pub fn mark_unread(&mut self, identifier: &str) -> Result<(), CatalogError> {
        self.set_read(identifier, false)
    }

    /// Rate a book that has been read.
    ///
    /// Overwrites any earlier rating.
    pub fn rate(&mut self, identifier: &str, score: i64) -> Result<(), CatalogError> {
        let pos = self.position(identifier)?;
        if !self.books[pos].is_read() {
            return Err(CatalogError::NotRead(identifier.to_string()));
        }
        let rating = validate_rating(score)?;

        self.books[pos].set_rating(rating);
        info!(identifier, rating, "Rated book");
        self.persist()
    }

    /// All books in insertion order
    pub fn list_all(&self) -> &[Book] {
        &self.books
    }

    pub fn list_read(&self) -> Vec<&Book> {
        self.books.iter().filter(|b| b.is_read()).collect()
    }

    pub fn list_unread(&self) -> Vec<&Book> {
        self.books.iter().filter(|b| !b.is_read()).collect()
    }

    /// Search titles (case-insensitive substring match)
    pub fn find_by_title(&self, query: &str) -> Vec<&Book> {
        let query_lower = query.to_lowercase();

        self.books
            .iter()
            .filter(|b| b.title().to_lowercase().contains(&query_lower))
            .collect()
    }

    /// Search authors (case-insensitive substring match)
    pub fn find_by_author(&self, query: &str) -> Vec<&Book> {
        let query_lower = query.to_lowercase();

        self.books
            .iter()
            .filter(|b| b.author().to_lowercase().contains(&query_lower))
            .collect()
    }

    pub fn find_by_year(&self, year: i32) -> Vec<&Book> {
        self.books.iter().filter(|b| b.year() == year).collect()
    }

    pub fn find_by_identifier(&self, identifier: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.identifier() == identifier)
    }

    /// Read books rated at least `threshold`.
    ///
    /// Unrated books never match, and neither do unread books holding a
    /// rating from before they were marked unread.
    pub fn list_by_minimum_rating(&self, threshold: i64) -> Vec<&Book> {
        self.books
            .iter()
            .filter(|b| b.is_read())
            .filter(|b| b.rating().is_some_and(|r| i64::from(r) >= threshold))
            .collect()
    }

    pub fn summary_report(&self) -> Summary {
        let total = self.books.len();
        let read = self.books.iter().filter(|b| b.is_read()).count();

        let ratings: Vec<u8> = self
            .books
            .iter()
            .filter(|b| b.is_read())
            .filter_map(Book::rating)
            .collect();

        let mean_rating = if ratings.is_empty() {
            None
        } else {
            let sum: u64 = ratings.iter().map(|&r| u64::from(r)).sum();
            Some(sum as f64 / ratings.len() as f64)
        };

        Summary {
            total,
            read,
            unread: total - read,
            mean_rating,
        }
    }

    /// Get the number of books
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn set_read(&mut self, identifier: &str, read: bool) -> Result<(), CatalogError> {
        let pos = self.position(identifier)?;
        self.books[pos].set_read(read);

        info!(identifier, read, "Updated read status");
        self.persist()
    }

    fn position(&self, identifier: &str) -> Result<usize, CatalogError> {
        self.books
            .iter()
            .position(|b| b.identifier() == identifier)
            .ok_or_else(|| CatalogError::NotFound(identifier.to_string()))
    }

    fn persist(&self) -> Result<(), CatalogError> {
        self.store.save(&self.books)
    }
}
