//! Modal form state for the TUI
//!
//! Each form owns its raw text fields plus focus and error state. Input
//! characters are validated as they arrive; `parse_inputs` does the final
//! validation when the user submits.

use anyhow::{anyhow, Context, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use libris_core::{Book, SearchField};

/// Form state for adding a book.
#[derive(Default, Clone)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) year: String,
    pub(crate) genre: String,
    pub(crate) read: bool,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

/// Fields available within the book form.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum BookField {
    Title,
    Author,
    Year,
    Genre,
    Read,
}

impl Default for BookField {
    fn default() -> Self {
        BookField::Title
    }
}

impl BookForm {
    /// Cycle focus across the form fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            BookField::Title => BookField::Author,
            BookField::Author => BookField::Year,
            BookField::Year => BookField::Genre,
            BookField::Genre => BookField::Read,
            BookField::Read => BookField::Title,
        };
    }

    /// Append a character to the active field, validating allowed input.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            BookField::Title => push_text(&mut self.title, ch),
            BookField::Author => push_text(&mut self.author, ch),
            BookField::Year => {
                // Four digits keeps the year within 0-9999
                if ch.is_ascii_digit() && self.year.chars().count() < 4 {
                    self.year.push(ch);
                    true
                } else {
                    false
                }
            }
            BookField::Genre => push_text(&mut self.genre, ch),
            BookField::Read => match ch {
                ' ' => {
                    self.read = !self.read;
                    true
                }
                'y' | 'Y' => {
                    self.read = true;
                    true
                }
                'n' | 'N' => {
                    self.read = false;
                    true
                }
                _ => false,
            },
        }
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            BookField::Title => {
                self.title.pop();
            }
            BookField::Author => {
                self.author.pop();
            }
            BookField::Year => {
                self.year.pop();
            }
            BookField::Genre => {
                self.genre.pop();
            }
            BookField::Read => {}
        }
    }

    /// Validate the inputs and build the book ready for the library.
    pub(crate) fn parse_inputs(&self) -> Result<Book> {
        let year = if self.year.trim().is_empty() {
            0
        } else {
            self.year
                .trim()
                .parse::<u16>()
                .context("Year must be a number.")?
        };

        let book = Book::new(
            self.title.clone(),
            self.author.clone(),
            year,
            self.genre.clone(),
        )?;
        Ok(book.with_read(self.read))
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field_name: &str, field: BookField) -> Line<'static> {
        let is_active = self.active == field;
        let (display, empty) = match field {
            BookField::Title => display_value(&self.title, "<required>"),
            BookField::Author => display_value(&self.author, "<required>"),
            BookField::Year => display_value(&self.year, "<optional>"),
            BookField::Genre => display_value(&self.genre, "<required>"),
            BookField::Read => (if self.read { "yes" } else { "no" }.to_string(), false),
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, field_style(is_active, empty)),
        ])
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: BookField) -> usize {
        match field {
            BookField::Title => self.title.chars().count(),
            BookField::Author => self.author.chars().count(),
            BookField::Year => self.year.chars().count(),
            BookField::Genre => self.genre.chars().count(),
            BookField::Read => if self.read { "yes" } else { "no" }.chars().count(),
        }
    }
}

/// Form state for removing a book by title.
#[derive(Default, Clone)]
pub(crate) struct RemoveForm {
    pub(crate) title: String,
    pub(crate) error: Option<String>,
}

impl RemoveForm {
    /// Append a character to the title field.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        push_text(&mut self.title, ch)
    }

    /// Remove the last character from the title field.
    pub(crate) fn backspace(&mut self) {
        self.title.pop();
    }

    /// Validate the title and return it trimmed.
    pub(crate) fn parse_inputs(&self) -> Result<String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(anyhow!("Title is required."));
        }
        Ok(title.to_string())
    }

    /// Render the title line for the form widget.
    pub(crate) fn build_line(&self) -> Line<'static> {
        let (display, empty) = display_value(&self.title, "<required>");
        Line::from(vec![
            Span::raw("Title: ".to_string()),
            Span::styled(display, field_style(true, empty)),
        ])
    }

    /// Character count of the title field.
    pub(crate) fn value_len(&self) -> usize {
        self.title.chars().count()
    }
}

/// Form state for searching by title or author.
#[derive(Clone)]
pub(crate) struct SearchForm {
    pub(crate) term: String,
    pub(crate) field: SearchField,
    pub(crate) active: SearchFormField,
    pub(crate) error: Option<String>,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            term: String::new(),
            field: SearchField::Title,
            active: SearchFormField::By,
            error: None,
        }
    }
}

/// Focusable parts of the search form.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum SearchFormField {
    By,
    Term,
}

impl SearchForm {
    /// Swap focus between the field selector and the term input.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            SearchFormField::By => SearchFormField::Term,
            SearchFormField::Term => SearchFormField::By,
        };
    }

    /// Flip the selector between title and author.
    pub(crate) fn toggle_search_by(&mut self) {
        self.field = match self.field {
            SearchField::Title => SearchField::Author,
            SearchField::Author => SearchField::Title,
        };
    }

    /// Append a character to the active part of the form.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            SearchFormField::By => match ch {
                ' ' => {
                    self.toggle_search_by();
                    true
                }
                't' | 'T' => {
                    self.field = SearchField::Title;
                    true
                }
                'a' | 'A' => {
                    self.field = SearchField::Author;
                    true
                }
                _ => false,
            },
            SearchFormField::Term => push_text(&mut self.term, ch),
        }
    }

    /// Remove the last character from the term input.
    pub(crate) fn backspace(&mut self) {
        if self.active == SearchFormField::Term {
            self.term.pop();
        }
    }

    /// Validate the term and return it trimmed.
    pub(crate) fn parse_inputs(&self) -> Result<String> {
        let term = self.term.trim();
        if term.is_empty() {
            return Err(anyhow!("Search term is required."));
        }
        Ok(term.to_string())
    }

    /// Render the field selector line.
    pub(crate) fn build_by_line(&self) -> Line<'static> {
        let is_active = self.active == SearchFormField::By;
        Line::from(vec![
            Span::raw("Search by: ".to_string()),
            Span::styled(
                field_label(self.field).to_string(),
                field_style(is_active, false),
            ),
        ])
    }

    /// Render the term input line, labeled after the selected field.
    pub(crate) fn build_term_line(&self) -> Line<'static> {
        let is_active = self.active == SearchFormField::Term;
        let (display, empty) = display_value(&self.term, "<required>");
        Line::from(vec![
            Span::raw(format!("{}: ", field_label(self.field))),
            Span::styled(display, field_style(is_active, empty)),
        ])
    }

    /// Character count of the term input.
    pub(crate) fn value_len(&self) -> usize {
        self.term.chars().count()
    }
}

/// Capitalized label for the search field selector.
pub(crate) fn field_label(field: SearchField) -> &'static str {
    match field {
        SearchField::Title => "Title",
        SearchField::Author => "Author",
    }
}

fn push_text(value: &mut String, ch: char) -> bool {
    if !ch.is_control() {
        value.push(ch);
        true
    } else {
        false
    }
}

fn display_value(value: &str, placeholder: &str) -> (String, bool) {
    if value.is_empty() {
        (placeholder.to_string(), true)
    } else {
        (value.to_string(), false)
    }
}

fn field_style(is_active: bool, empty: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Yellow)
    } else if empty {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    }
}
