//! A single book in the catalog.
//!
//! `Book` keeps its fields private so the read/rating rules enforced by the
//! catalog cannot be bypassed. `BookRecord` is the plain key/value shape that
//! goes to disk.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::CatalogError;

/// Lowest accepted rating
pub const MIN_RATING: u8 = 1;

/// Highest accepted rating
pub const MAX_RATING: u8 = 5;

/// A book entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    title: String,
    author: String,
    year: i32,
    identifier: String,
    read: bool,
    rating: Option<u8>,
}

impl Book {
    /// Create a new unread, unrated book.
    ///
    /// Fails if the title, author or identifier is empty.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        identifier: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let title = title.into();
        let author = author.into();
        let identifier = identifier.into();

        if title.is_empty() {
            return Err(CatalogError::MissingField("title"));
        }
        if author.is_empty() {
            return Err(CatalogError::MissingField("author"));
        }
        if identifier.is_empty() {
            return Err(CatalogError::MissingField("identifier"));
        }

        Ok(Self {
            title,
            author,
            year,
            identifier,
            read: false,
            rating: None,
        })
    }

    /// Set the read flag
    pub fn with_read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The ISBN, unique within a catalog
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    /// Rating in `MIN_RATING..=MAX_RATING`, if one was ever given.
    ///
    /// Kept after the book is marked unread again.
    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    /// Convert to the on-disk representation
    pub fn to_record(&self) -> BookRecord {
        BookRecord {
            title: self.title.clone(),
            author: self.author.clone(),
            year: self.year,
            identifier: self.identifier.clone(),
            read: self.read,
            rating: self.rating.map(i64::from),
        }
    }

    pub(crate) fn set_read(&mut self, read: bool) {
        self.read = read;
    }

    pub(crate) fn set_rating(&mut self, rating: u8) {
        self.rating = Some(rating);
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({}) - ISBN: {} - read: {}",
            self.title,
            self.author,
            self.year,
            self.identifier,
            if self.read { "yes" } else { "no" }
        )?;
        match self.rating {
            Some(rating) => write!(f, " - rating: {}", rating),
            None => write!(f, " - rating: -"),
        }
    }
}

/// Check a caller-supplied score and narrow it to a stored rating
pub fn validate_rating(score: i64) -> Result<u8, CatalogError> {
    if (i64::from(MIN_RATING)..=i64::from(MAX_RATING)).contains(&score) {
        Ok(score as u8)
    } else {
        Err(CatalogError::InvalidRating(score))
    }
}

/// Plain key/value form of a book, as stored in the catalog file.
///
/// Accepts the Portuguese keys written by the first version of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(alias = "titulo")]
    pub title: String,

    #[serde(alias = "autor")]
    pub author: String,

    #[serde(alias = "ano")]
    pub year: i32,

    #[serde(alias = "isbn")]
    pub identifier: String,

    #[serde(default, alias = "lido")]
    pub read: bool,

    #[serde(default, alias = "avaliacao")]
    pub rating: Option<i64>,
}

impl TryFrom<BookRecord> for Book {
    type Error = CatalogError;

    fn try_from(record: BookRecord) -> Result<Self, Self::Error> {
        let mut book = Book::new(record.title, record.author, record.year, record.identifier)?
            .with_read(record.read);
        if let Some(score) = record.rating {
            book.rating = Some(validate_rating(score)?);
        }
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_creation() {
        let book = Book::new("Titulo A", "Autor A", 2020, "12345").unwrap();

        assert_eq!(book.title(), "Titulo A");
        assert_eq!(book.author(), "Autor A");
        assert_eq!(book.year(), 2020);
        assert_eq!(book.identifier(), "12345");
        assert!(!book.is_read());
        assert_eq!(book.rating(), None);
    }

    #[test]
    fn test_book_requires_fields() {
        assert!(matches!(
            Book::new("", "Autor B", 2021, "54321"),
            Err(CatalogError::MissingField("title"))
        ));
        assert!(matches!(
            Book::new("Titulo", "", 2021, "54321"),
            Err(CatalogError::MissingField("author"))
        ));
        assert!(matches!(
            Book::new("Titulo", "Autor", 2021, ""),
            Err(CatalogError::MissingField("identifier"))
        ));
    }

    #[test]
    fn test_validate_rating() {
        for score in 1..=5 {
            assert_eq!(validate_rating(score).unwrap(), score as u8);
        }
        for score in [0, 6, -1, 256, i64::MAX] {
            assert!(matches!(
                validate_rating(score),
                Err(CatalogError::InvalidRating(s)) if s == score
            ));
        }
    }

    #[test]
    fn test_record_uses_null_for_missing_rating() {
        let book = Book::new("Livro", "Autor", 2024, "1").unwrap();
        let json = serde_json::to_value(book.to_record()).unwrap();

        assert_eq!(json["identifier"], "1");
        assert_eq!(json["read"], false);
        assert!(json["rating"].is_null());
    }

    #[test]
    fn test_record_from_legacy_keys() {
        let json = r#"{
            "titulo": "Persistencia",
            "autor": "Autor Persistente",
            "ano": 2024,
            "isbn": "99999",
            "lido": true,
            "avaliacao": 4
        }"#;

        let record: BookRecord = serde_json::from_str(json).unwrap();
        let book = Book::try_from(record).unwrap();

        assert_eq!(book.title(), "Persistencia");
        assert!(book.is_read());
        assert_eq!(book.rating(), Some(4));
    }

    #[test]
    fn test_record_rejects_bad_rating() {
        let record = BookRecord {
            title: "Livro".to_string(),
            author: "Autor".to_string(),
            year: 2024,
            identifier: "1".to_string(),
            read: true,
            rating: Some(9),
        };

        assert!(matches!(
            Book::try_from(record),
            Err(CatalogError::InvalidRating(9))
        ));
    }

    #[test]
    fn test_display() {
        let book = Book::new("Duna", "Frank Herbert", 1965, "42")
            .unwrap()
            .with_read(true);

        assert_eq!(
            book.to_string(),
            "Duna - Frank Herbert (1965) - ISBN: 42 - read: yes - rating: -"
        );
    }
}
