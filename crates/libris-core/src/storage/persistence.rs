//! Library file persistence
//!
//! Handles saving and loading the book collection to/from the filesystem.
//! Uses atomic writes (write to temp file, then rename) to prevent corruption.
//!
//! Storage location: `~/.local/share/libris/library.json` (configurable via
//! `Config`). The file holds the whole library as a pretty-printed JSON
//! array; every mutation rewrites it in full.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::models::Book;
use crate::storage::error::{StorageError, StorageResult};

/// Persistence layer for the library file
///
/// Provides atomic file operations for saving/loading the book collection.
pub struct JsonPersistence {
    config: Config,
}

impl JsonPersistence {
    /// Create a new persistence handler with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path of the backing library file
    pub fn library_path(&self) -> PathBuf {
        self.config.library_path()
    }

    /// Check if a library file exists on disk
    pub fn exists(&self) -> bool {
        self.config.library_path().exists()
    }

    /// Save the full book collection using atomic write
    ///
    /// This writes to a temporary file first, then renames it to the target
    /// path. This ensures the file is never left in a partially-written state.
    pub fn save(&self, books: &[Book]) -> StorageResult<()> {
        let bytes = serde_json::to_vec_pretty(books)?;
        let target_path = self.config.library_path();

        atomic_write(&target_path, &bytes)?;
        debug!("Saved {} books to {:?}", books.len(), target_path);

        Ok(())
    }

    /// Load the book collection from disk
    ///
    /// Returns `None` if the library file doesn't exist.
    /// Returns an error if the file exists but can't be read or parsed;
    /// a malformed file is fatal and is never repaired or backed up.
    pub fn load(&self) -> StorageResult<Option<Vec<Book>>> {
        let path = self.config.library_path();

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(|e| StorageError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        let books: Vec<Book> =
            serde_json::from_slice(&bytes).map_err(|e| StorageError::InvalidFormat {
                path: path.clone(),
                details: e.to_string(),
            })?;

        debug!("Loaded {} books from {:?}", books.len(), path);
        Ok(Some(books))
    }

    /// Load the persisted collection or start empty
    ///
    /// A missing file is not an error and nothing is written; the file
    /// first appears on the first successful mutation.
    pub fn load_or_default(&self) -> StorageResult<Vec<Book>> {
        Ok(self.load()?.unwrap_or_default())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// This ensures the target file is never left in a partially-written state.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    // Create temp file in the same directory (for atomic rename)
    let temp_path = path.with_extension("tmp");

    // Write to temp file
    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    // Sync to disk before rename
    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    // Atomic rename
    fs::rename(&temp_path, path).map_err(|e| StorageError::AtomicWriteFailed {
        from: temp_path,
        to: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
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
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonPersistence::new(test_config(&temp_dir));

        // Initially no library file
        assert!(!persistence.exists());
        assert!(persistence.load().unwrap().is_none());

        let books = vec![
            book("Dune", "Frank Herbert", 1965, "Science Fiction"),
            book("Emma", "Jane Austen", 1815, "Romance").with_read(true),
        ];

        persistence.save(&books).unwrap();
        assert!(persistence.exists());

        // Load and verify
        let loaded = persistence.load().unwrap().unwrap();
        assert_eq!(loaded, books);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonPersistence::new(test_config(&temp_dir));

        let books = persistence.load_or_default().unwrap();
        assert!(books.is_empty());

        // Loading must not create the file
        assert!(!persistence.exists());
    }

    #[test]
    fn test_load_or_default_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonPersistence::new(test_config(&temp_dir));

        persistence
            .save(&[book("Dune", "Frank Herbert", 1965, "Science Fiction")])
            .unwrap();

        let books = persistence.load_or_default().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Dune");
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonPersistence::new(test_config(&temp_dir));

        fs::write(persistence.library_path(), b"not json at all").unwrap();

        let err = persistence.load().unwrap_err();
        assert!(matches!(err, StorageError::InvalidFormat { .. }));
    }

    #[test]
    fn test_load_rejects_wrong_shape() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonPersistence::new(test_config(&temp_dir));

        // Valid JSON, but not an array of books
        fs::write(persistence.library_path(), br#"{"title": "Dune"}"#).unwrap();

        let err = persistence.load().unwrap_err();
        assert!(matches!(err, StorageError::InvalidFormat { .. }));
    }

    #[test]
    fn test_save_rewrites_whole_file() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonPersistence::new(test_config(&temp_dir));

        persistence
            .save(&[
                book("Dune", "Frank Herbert", 1965, "Science Fiction"),
                book("Emma", "Jane Austen", 1815, "Romance"),
            ])
            .unwrap();

        persistence
            .save(&[book("Emma", "Jane Austen", 1815, "Romance")])
            .unwrap();

        let loaded = persistence.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "Emma");
    }

    #[test]
    fn test_saved_file_is_pretty_printed_array() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonPersistence::new(test_config(&temp_dir));

        persistence
            .save(&[book("Dune", "Frank Herbert", 1965, "Science Fiction")])
            .unwrap();

        let content = fs::read_to_string(persistence.library_path()).unwrap();
        assert!(content.starts_with('['));
        assert!(content.contains('\n'));
        assert!(content.contains("\"title\""));
        assert!(content.contains("\"read\""));
    }

    #[test]
    fn test_library_file_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom = temp_dir.path().join("books").join("mine.json");
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
            library_file: Some(custom.clone()),
            log_file: None,
        };
        let persistence = JsonPersistence::new(config);

        persistence
            .save(&[book("Dune", "Frank Herbert", 1965, "Science Fiction")])
            .unwrap();

        assert!(custom.exists());
        assert_eq!(persistence.library_path(), custom);
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir
            .path()
            .join("a")
            .join("b")
            .join("c")
            .join("file.txt");

        atomic_write(&nested_path, b"test data").unwrap();

        assert!(nested_path.exists());
        let content = fs::read_to_string(&nested_path).unwrap();
        assert_eq!(content, "test data");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonPersistence::new(test_config(&temp_dir));

        persistence
            .save(&[book("Dune", "Frank Herbert", 1965, "Science Fiction")])
            .unwrap();

        let temp_path = persistence.library_path().with_extension("tmp");
        assert!(!temp_path.exists());
    }
}
