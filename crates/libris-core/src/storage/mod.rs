//! Storage layer
//!
//! Handles persistence of the book collection as a single JSON file.
//! The file is the source of truth between sessions; the in-memory
//! `Library` is authoritative within one. Every successful mutation
//! rewrites the file in full.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::JsonPersistence;
