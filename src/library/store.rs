//! JSON file backing the catalog.
//!
//! The whole collection is rewritten on every save: pretty-printed JSON goes to
//! a temporary file next to the target, which is then renamed over it.

use std::collections::HashSet;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::{Book, BookRecord, CatalogError};

/// Flat-file store for the catalog
#[derive(Debug, Clone)]
pub struct CatalogStore {
    /// Path to the catalog JSON file
    path: PathBuf,
}

impl CatalogStore {
    /// Create a store for the given file. Nothing is touched on disk yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all books, in file order.
    ///
    /// A missing file is an empty catalog.
    pub fn load(&self) -> Result<Vec<Book>, CatalogError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Catalog file missing, starting empty");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let records: Vec<BookRecord> = serde_json::from_str(&content)?;

        let mut seen = HashSet::with_capacity(records.len());
        let mut books = Vec::with_capacity(records.len());

        for record in records {
            let book = Book::try_from(record)?;
            if !seen.insert(book.identifier().to_string()) {
                return Err(CatalogError::DuplicateIdentifier(
                    book.identifier().to_string(),
                ));
            }
            books.push(book);
        }

        debug!(path = %self.path.display(), count = books.len(), "Loaded catalog");
        Ok(books)
    }

    /// Replace the file contents with `books`
    pub fn save(&self, books: &[Book]) -> Result<(), CatalogError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // Ensure parent directory exists
        fs::create_dir_all(dir)?;

        let records: Vec<BookRecord> = books.iter().map(Book::to_record).collect();
        let content = serde_json::to_string_pretty(&records)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;

        // Keep the mode of the file being replaced
        match fs::metadata(&self.path) {
            Ok(meta) => tmp.as_file().set_permissions(meta.permissions())?,
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), count = books.len(), "Saved catalog");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn book(title: &str, isbn: &str) -> Book {
        Book::new(title, "Autor", 2020, isbn).unwrap()
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = CatalogStore::new(temp.path().join("books.json"));

        assert!(store.load().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("data").join("books.json");
        let store = CatalogStore::new(&path);

        store.save(&[book("Livro 1", "1")]).unwrap();

        assert!(path.exists());
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_save_writes_pretty_array() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("books.json");
        let store = CatalogStore::new(&path);

        store.save(&[book("Livro 1", "1"), book("Livro 2", "2")]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("[\n"));

        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["title"], "Livro 1");
        assert_eq!(array[1]["identifier"], "2");
        assert!(array[1]["rating"].is_null());
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let temp = TempDir::new().unwrap();
        let store = CatalogStore::new(temp.path().join("books.json"));

        store.save(&[book("Livro 1", "1"), book("Livro 2", "2")]).unwrap();
        store.save(&[book("Livro 3", "3")]).unwrap();

        let books = store.load().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title(), "Livro 3");
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("books.json");
        std::fs::write(&path, "[]").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        CatalogStore::new(&path).save(&[book("Livro 1", "1")]).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_load_rejects_duplicate_identifier() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("books.json");
        std::fs::write(
            &path,
            r#"[
                {"title": "A", "author": "X", "year": 2000, "identifier": "1", "read": false, "rating": null},
                {"title": "B", "author": "Y", "year": 2001, "identifier": "1", "read": false, "rating": null}
            ]"#,
        )
        .unwrap();

        let result = CatalogStore::new(&path).load();
        assert!(matches!(result, Err(CatalogError::DuplicateIdentifier(id)) if id == "1"));
    }

    #[test]
    fn test_load_propagates_validation_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("books.json");
        std::fs::write(
            &path,
            r#"[{"title": "", "author": "X", "year": 2000, "identifier": "1"}]"#,
        )
        .unwrap();

        let result = CatalogStore::new(&path).load();
        assert!(matches!(result, Err(CatalogError::MissingField("title"))));
    }

    #[test]
    fn test_load_malformed_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("books.json");
        std::fs::write(&path, "not json").unwrap();

        let result = CatalogStore::new(&path).load();
        assert!(matches!(result, Err(CatalogError::Serialization(_))));
    }
}
