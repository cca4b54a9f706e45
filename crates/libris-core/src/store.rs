//! Unified storage interface
//!
//! The `Store` owns the in-memory `Library` and coordinates persistence:
//! every successful mutation rewrites the library file, while reads are
//! served from memory without touching disk.
//!
//! ## Session model
//!
//! The library is loaded once when the store opens and is authoritative
//! for the rest of the session. On first run no file exists yet; the
//! store starts empty and the file appears on the first successful
//! mutation.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open()?;
//!
//! let book = Book::new("Dune", "Frank Herbert", 1965, "Science Fiction")?;
//! store.add_book(book)?;
//!
//! for book in store.books() {
//!     println!("{}", book);
//! }
//! ```

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::library::{Library, LibraryStats, RemoveOutcome};
use crate::models::{Book, SearchField};
use crate::storage::JsonPersistence;

/// Unified storage interface for libris
///
/// Owns the in-memory library and keeps the JSON file in sync.
pub struct Store {
    /// The in-memory book collection
    library: Library,
    /// JSON file persistence handler
    persistence: JsonPersistence,
    /// Configuration
    config: Config,
}

impl Store {
    /// Open the store, loading the persisted library if one exists
    ///
    /// A malformed library file is a fatal error; the store never
    /// repairs or discards existing data.
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config)
    }

    /// Open the store with a specific configuration
    pub fn open_with_config(config: Config) -> Result<Self> {
        let persistence = JsonPersistence::new(config.clone());

        let books = persistence
            .load_or_default()
            .context("Failed to load library")?;

        Ok(Self {
            library: Library::from_books(books),
            persistence,
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the in-memory library
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// All books in insertion order
    pub fn books(&self) -> &[Book] {
        self.library.books()
    }

    /// Number of books in the library
    pub fn book_count(&self) -> usize {
        self.library.len()
    }

    /// Whether the library holds no books
    pub fn is_empty(&self) -> bool {
        self.library.is_empty()
    }

    // ==================== Mutations ====================

    /// Add a validated book and persist the library
    pub fn add_book(&mut self, book: Book) -> Result<()> {
        info!("Adding book '{}'", book.title);
        self.library.add(book);
        self.save()
    }

    /// Remove the first book matching the title, case-insensitively
    ///
    /// The library file is rewritten only when a book was actually
    /// removed; a `NotFound` outcome leaves the file untouched.
    pub fn remove_book(&mut self, title: &str) -> Result<RemoveOutcome> {
        let outcome = self.library.remove(title);
        if let RemoveOutcome::Removed(book) = &outcome {
            info!("Removed book '{}'", book.title);
            self.save()?;
        }
        Ok(outcome)
    }

    // ==================== Queries ====================

    /// Find books whose selected field contains the term
    pub fn search(&self, field: SearchField, term: &str) -> Vec<&Book> {
        self.library.search(field, term)
    }

    /// Read-progress summary over the whole library
    pub fn stats(&self) -> LibraryStats {
        self.library.stats()
    }

    /// Rewrite the library file with the in-memory state
    fn save(&self) -> Result<()> {
        self.persistence
            .save(self.library.books())
            .context("Failed to save library")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            library_file: None,
            log_file: None,
        }
    }

    fn book(title: &str, author: &str, year: u16, genre: &str) -> Book {
        Book::new(title, author, year, genre).unwrap()
    }

    #[test]
    fn test_open_starts_empty_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let store = Store::open_with_config(config.clone()).unwrap();

        assert!(store.is_empty());
        assert_eq!(store.book_count(), 0);
        // Opening must not create the library file
        assert!(!config.library_path().exists());
    }

    #[test]
    fn test_add_book_persists() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        {
            let mut store = Store::open_with_config(config.clone()).unwrap();
            store
                .add_book(book("Dune", "Frank Herbert", 1965, "Science Fiction"))
                .unwrap();
            assert!(config.library_path().exists());
        }

        let store = Store::open_with_config(config).unwrap();
        assert_eq!(store.book_count(), 1);
        assert_eq!(store.books()[0].title, "Dune");
    }

    #[test]
    fn test_remove_book_persists() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        {
            let mut store = Store::open_with_config(config.clone()).unwrap();
            store
                .add_book(book("Dune", "Frank Herbert", 1965, "Science Fiction"))
                .unwrap();
            store
                .add_book(book("Emma", "Jane Austen", 1815, "Romance"))
                .unwrap();

            let outcome = store.remove_book("dune").unwrap();
            assert!(matches!(outcome, RemoveOutcome::Removed(_)));
        }

        let store = Store::open_with_config(config).unwrap();
        assert_eq!(store.book_count(), 1);
        assert_eq!(store.books()[0].title, "Emma");
    }

    #[test]
    fn test_remove_not_found_does_not_create_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let mut store = Store::open_with_config(config.clone()).unwrap();
        let outcome = store.remove_book("Dune").unwrap();

        assert_eq!(outcome, RemoveOutcome::NotFound);
        assert!(!config.library_path().exists());
    }

    #[test]
    fn test_remove_not_found_keeps_existing_data() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        {
            let mut store = Store::open_with_config(config.clone()).unwrap();
            store
                .add_book(book("Dune", "Frank Herbert", 1965, "Science Fiction"))
                .unwrap();
            let outcome = store.remove_book("Middlemarch").unwrap();
            assert_eq!(outcome, RemoveOutcome::NotFound);
        }

        let store = Store::open_with_config(config).unwrap();
        assert_eq!(store.book_count(), 1);
    }

    #[test]
    fn test_search_through_store() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_with_config(test_config(&temp_dir)).unwrap();

        store
            .add_book(book("Dune", "Frank Herbert", 1965, "Science Fiction"))
            .unwrap();
        store
            .add_book(book("Emma", "Jane Austen", 1815, "Romance"))
            .unwrap();

        let results = store.search(SearchField::Author, "herbert");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Dune");
    }

    #[test]
    fn test_stats_through_store() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_with_config(test_config(&temp_dir)).unwrap();

        store
            .add_book(book("Dune", "Frank Herbert", 1965, "Science Fiction"))
            .unwrap();
        store
            .add_book(book("Emma", "Jane Austen", 1815, "Romance").with_read(true))
            .unwrap();

        let stats = store.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.read, 1);
        assert_eq!(stats.percent_read, 50.0);
    }

    #[test]
    fn test_data_persists_across_reopens() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        // Create and add data
        {
            let mut store = Store::open_with_config(config.clone()).unwrap();
            store
                .add_book(book("Dune", "Frank Herbert", 1965, "Science Fiction"))
                .unwrap();
            store
                .add_book(book("Emma", "Jane Austen", 1815, "Romance").with_read(true))
                .unwrap();
        }

        // Reopen and verify
        {
            let store = Store::open_with_config(config).unwrap();

            assert_eq!(store.book_count(), 2);
            assert_eq!(store.books()[0].title, "Dune");
            assert!(!store.books()[0].read);
            assert_eq!(store.books()[1].title, "Emma");
            assert!(store.books()[1].read);
        }
    }

    #[test]
    fn test_open_fails_on_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        std::fs::write(config.library_path(), b"{{{ not json").unwrap();

        let result = Store::open_with_config(config);
        assert!(result.is_err());
    }

    #[test]
    fn test_insertion_order_survives_persistence() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let titles = ["One", "Two", "Three", "Four"];
        {
            let mut store = Store::open_with_config(config.clone()).unwrap();
            for title in titles {
                store.add_book(book(title, "Author", 2000, "Genre")).unwrap();
            }
        }

        let store = Store::open_with_config(config).unwrap();
        let loaded: Vec<&str> = store.books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(loaded, titles);
    }
}
