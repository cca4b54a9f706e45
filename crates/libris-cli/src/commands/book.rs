//! Book command handlers

use anyhow::{bail, Context, Result};

use libris_core::{Book, RemoveOutcome, SearchField, Store};

use crate::output::Output;

/// Add a book to the library
pub fn add(
    store: &mut Store,
    title: String,
    author: String,
    year: u16,
    genre: String,
    read: bool,
    output: &Output,
) -> Result<()> {
    let book = Book::new(title, author, year, genre)?.with_read(read);
    let title = book.title.clone();

    store.add_book(book).context("Failed to add book")?;

    output.success(&format!("'{}' added successfully!", title));

    Ok(())
}

/// Remove the first book whose title matches case-insensitively
pub fn remove(store: &mut Store, title: String, output: &Output) -> Result<()> {
    match store.remove_book(&title).context("Failed to remove book")? {
        RemoveOutcome::Removed(book) => {
            output.success(&format!("'{}' removed successfully!", book.title));
            Ok(())
        }
        RemoveOutcome::NotFound => bail!("'{}' not found in library.", title),
    }
}

/// Search books by title or author
pub fn search(store: &Store, field: SearchField, term: String, output: &Output) -> Result<()> {
    if term.trim().is_empty() {
        bail!("Search term is required.");
    }

    let matches = store.search(field, &term);
    output.print_search_results(&matches);
    Ok(())
}

/// List all books in the library
pub fn list(store: &Store, output: &Output) -> Result<()> {
    output.print_books(store.books());
    Ok(())
}

/// Show library statistics
pub fn stats(store: &Store, output: &Output) -> Result<()> {
    output.print_stats(&store.stats());
    Ok(())
}
