//! In-memory book collection
//!
//! `Library` holds the ordered book collection and implements the
//! operations on it: add, remove, search, enumerate and stats. It is a
//! pure container with no I/O; the `Store` layers persistence on top and
//! owns the save-after-mutation rule.
//!
//! Ordering is insertion order: new books append at the end, and every
//! listing and search reports books in that order. Duplicate titles are
//! allowed; removal only ever takes the first match.

use serde::Serialize;

use crate::models::{Book, SearchField};

/// The ordered book collection for one user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    books: Vec<Book>,
}

impl Library {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library from already-validated books (loading from storage)
    pub fn from_books(books: Vec<Book>) -> Self {
        Self { books }
    }

    /// All books in insertion order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Iterate books in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Book> {
        self.books.iter()
    }

    /// Number of books
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the library holds no books
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Append a book to the end of the library
    ///
    /// Duplicates are allowed; `Book::new` has already validated the
    /// fields, so adding cannot fail.
    pub fn add(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Remove the first book whose title matches, case-insensitively
    ///
    /// The match is an exact title comparison, not a substring one. At
    /// most one book is removed per call; with no match the library is
    /// unchanged and `NotFound` is reported.
    pub fn remove(&mut self, title: &str) -> RemoveOutcome {
        let needle = title.to_lowercase();
        match self
            .books
            .iter()
            .position(|book| book.title.to_lowercase() == needle)
        {
            Some(pos) => RemoveOutcome::Removed(self.books.remove(pos)),
            None => RemoveOutcome::NotFound,
        }
    }

    /// Find books whose selected field contains the term, case-insensitively
    ///
    /// Matches are returned in insertion order. An empty term matches
    /// every book; callers that want to reject it do so before calling.
    pub fn search(&self, field: SearchField, term: &str) -> Vec<&Book> {
        let needle = term.to_lowercase();
        self.books
            .iter()
            .filter(|book| {
                let haystack = match field {
                    SearchField::Title => &book.title,
                    SearchField::Author => &book.author,
                };
                haystack.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Read-progress summary over the whole library
    pub fn stats(&self) -> LibraryStats {
        let total = self.books.len();
        let read = self.books.iter().filter(|book| book.read).count();
        let percent_read = if total == 0 {
            0.0
        } else {
            (read as f64 / total as f64) * 100.0
        };
        LibraryStats {
            total,
            read,
            percent_read,
        }
    }
}

/// Result of a remove call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The first matching book, now deleted from the library
    Removed(Book),
    /// No title matched; the library is unchanged
    NotFound,
}

/// Read-progress summary for a library
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LibraryStats {
    /// Number of books in the library
    pub total: usize,
    /// Number of books marked read
    pub read: usize,
    /// Percentage of books marked read (0.0 when the library is empty)
    pub percent_read: f64,
}

impl LibraryStats {
    /// Percentage truncated to a whole number, for progress displays
    pub fn progress(&self) -> u8 {
        self.percent_read as u8
    }
}
