//! libris Core Library
//!
//! This crate provides the core functionality for libris, a personal
//! book library tracker.
//!
//! # Architecture
//!
//! The in-memory `Library` is the source of truth within a session; a
//! single JSON file carries it between sessions. Every successful
//! mutation rewrites the file in full.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open()?;
//!
//! // Add a book
//! let book = Book::new("Dune", "Frank Herbert", 1965, "Science Fiction")?;
//! store.add_book(book)?;
//!
//! // Query books
//! let matches = store.search(SearchField::Author, "herbert");
//! let stats = store.stats();
//! ```
//!
//! # Modules
//!
//! - `store`: Unified storage interface (main entry point)
//! - `library`: The ordered book collection and its operations
//! - `models`: The Book record and validation
//! - `storage`: JSON file persistence
//! - `config`: Application configuration

pub mod config;
pub mod library;
pub mod models;
pub mod storage;
pub mod store;

pub use config::Config;
pub use library::{Library, LibraryStats, RemoveOutcome};
pub use models::{Book, SearchField, ValidationError, MAX_YEAR};
pub use storage::{JsonPersistence, StorageError, StorageResult};
pub use store::Store;
