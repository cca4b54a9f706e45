//! Data models for libris
//!
//! Defines the core data structures: the Book record and the field
//! selector used by searches. Books are plain serde values persisted
//! as a JSON array.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest publication year a book may carry.
pub const MAX_YEAR: u16 = 9999;

/// A catalogued book
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    /// Book title
    pub title: String,
    /// Author name
    pub author: String,
    /// Publication year (0-9999)
    pub year: u16,
    /// Genre label
    pub genre: String,
    /// Whether the book has been read
    #[serde(default)]
    pub read: bool,
}

impl Book {
    /// Create a validated book.
    ///
    /// Text fields are trimmed; title, author and genre must be non-empty
    /// after trimming, and the year must fit in four digits. The book
    /// starts unread.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: u16,
        genre: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title = required(title.into(), "title")?;
        let author = required(author.into(), "author")?;
        let genre = required(genre.into(), "genre")?;
        if year > MAX_YEAR {
            return Err(ValidationError::YearOutOfRange(year));
        }
        Ok(Self {
            title,
            author,
            year,
            genre,
            read: false,
        })
    }

    /// Set the read status at construction time
    pub fn with_read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    /// Human-readable read status
    pub fn status(&self) -> &'static str {
        if self.read {
            "Read"
        } else {
            "Unread"
        }
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} by {} ({}) - {} - {}",
            self.title,
            self.author,
            self.year,
            self.genre,
            self.status()
        )
    }
}

fn required(value: String, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value)
}

/// Rejected book input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field was empty after trimming
    #[error("{0} is required")]
    MissingField(&'static str),
    /// Year outside the supported range
    #[error("year {0} is out of range (expected 0-{MAX_YEAR})")]
    YearOutOfRange(u16),
}

/// Which book field a search matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
}

impl SearchField {
    /// Field name as it appears in prompts and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
        }
    }
}

impl std::fmt::Display for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_new() {
        let book = Book::new("Dune", "Frank Herbert", 1965, "Science Fiction").unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.year, 1965);
        assert_eq!(book.genre, "Science Fiction");
        assert!(!book.read);
    }

    #[test]
    fn test_book_new_trims_fields() {
        let book = Book::new("  Dune  ", " Frank Herbert ", 1965, " Science Fiction ").unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.genre, "Science Fiction");
    }

    #[test]
    fn test_book_requires_title() {
        let err = Book::new("", "Frank Herbert", 1965, "Science Fiction").unwrap_err();
        assert_eq!(err, ValidationError::MissingField("title"));
    }

    #[test]
    fn test_book_requires_author() {
        let err = Book::new("Dune", "   ", 1965, "Science Fiction").unwrap_err();
        assert_eq!(err, ValidationError::MissingField("author"));
    }

    #[test]
    fn test_book_requires_genre() {
        let err = Book::new("Dune", "Frank Herbert", 1965, "").unwrap_err();
        assert_eq!(err, ValidationError::MissingField("genre"));
    }

    #[test]
    fn test_book_year_out_of_range() {
        let err = Book::new("Dune", "Frank Herbert", 10000, "Science Fiction").unwrap_err();
        assert_eq!(err, ValidationError::YearOutOfRange(10000));
        assert!(err.to_string().contains("0-9999"));
    }

    #[test]
    fn test_book_year_bounds() {
        assert!(Book::new("A", "B", 0, "C").is_ok());
        assert!(Book::new("A", "B", 9999, "C").is_ok());
    }

    #[test]
    fn test_book_with_read() {
        let book = Book::new("Emma", "Jane Austen", 1815, "Romance")
            .unwrap()
            .with_read(true);
        assert!(book.read);
        assert_eq!(book.status(), "Read");
    }

    #[test]
    fn test_book_display() {
        let book = Book::new("Dune", "Frank Herbert", 1965, "Science Fiction").unwrap();
        assert_eq!(
            book.to_string(),
            "Dune by Frank Herbert (1965) - Science Fiction - Unread"
        );
    }

    #[test]
    fn test_book_serialization() {
        let book = Book::new("Dune", "Frank Herbert", 1965, "Science Fiction").unwrap();
        let json = serde_json::to_string(&book).unwrap();
        let deserialized: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(book, deserialized);
    }

    #[test]
    fn test_book_read_defaults_false_when_missing() {
        let json = r#"{"title":"Dune","author":"Frank Herbert","year":1965,"genre":"Science Fiction"}"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert!(!book.read);
    }

    #[test]
    fn test_search_field_display() {
        assert_eq!(SearchField::Title.to_string(), "title");
        assert_eq!(SearchField::Author.to_string(), "author");
    }
}
