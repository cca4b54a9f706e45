//! TUI application state
//!
//! `App` owns the store and a small state machine: the menu selection, the
//! screen shown in the content pane, and an optional modal form layered on
//! top. Key handling swaps the mode out, runs the matching handler, and puts
//! the (possibly new) mode back.

use std::mem;

use anyhow::{Error, Result};
use crossterm::event::KeyCode;
use ratatui::style::{Color, Style};

use libris_core::{Book, RemoveOutcome, SearchField, Store};

use super::forms::{BookForm, RemoveForm, SearchForm, SearchFormField};

/// Menu entries shown in the left pane, in display order.
pub(crate) const MENU_ITEMS: [&str; 5] = [
    "Add a Book",
    "Remove a Book",
    "Search for a Book",
    "Display All Books",
    "Display Statistics",
];

/// What the content pane shows.
pub(crate) enum Screen {
    Books,
    SearchResults(SearchResults),
    Stats,
}

/// A completed search and its matches.
pub(crate) struct SearchResults {
    pub(crate) field: SearchField,
    pub(crate) term: String,
    pub(crate) books: Vec<Book>,
}

/// Modal input states layered over the current screen.
pub(crate) enum Mode {
    Normal,
    AddingBook(BookForm),
    RemovingBook(RemoveForm),
    Searching(SearchForm),
}

/// Holds the footer message text plus its severity.
pub(crate) struct StatusMessage {
    pub(crate) text: String,
    pub(crate) kind: StatusKind,
}

/// Severity levels shown in the footer.
pub(crate) enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    pub(crate) fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub(crate) struct App {
    pub(crate) store: Store,
    pub(crate) menu_index: usize,
    pub(crate) screen: Screen,
    pub(crate) mode: Mode,
    pub(crate) status: Option<StatusMessage>,
}

impl App {
    pub(crate) fn new(store: Store) -> Self {
        Self {
            store,
            menu_index: 0,
            screen: Screen::Books,
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Process one key press. Returns true when the app should exit.
    pub(crate) fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingBook(form) => self.handle_add_book(code, form)?,
            Mode::RemovingBook(form) => self.handle_remove_book(code, form)?,
            Mode::Searching(form) => self.handle_search(code, form)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => {
                self.menu_index = self.menu_index.saturating_sub(1);
            }
            KeyCode::Down => {
                self.menu_index = (self.menu_index + 1).min(MENU_ITEMS.len() - 1);
            }
            KeyCode::Enter => {
                self.clear_status();
                match self.menu_index {
                    0 => return Ok(Mode::AddingBook(BookForm::default())),
                    1 => return Ok(Mode::RemovingBook(RemoveForm::default())),
                    2 => return Ok(Mode::Searching(SearchForm::default())),
                    3 => self.screen = Screen::Books,
                    4 => self.screen = Screen::Stats,
                    _ => {}
                }
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_book(&form) {
                Ok(title) => {
                    self.set_status(format!("'{}' added successfully!", title), StatusKind::Info);
                    self.screen = Screen::Books;
                    keep_open = false;
                }
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::AddingBook(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn save_new_book(&mut self, form: &BookForm) -> Result<String> {
        let book = form.parse_inputs()?;
        let title = book.title.clone();
        self.store.add_book(book)?;
        Ok(title)
    }

    fn handle_remove_book(&mut self, code: KeyCode, mut form: RemoveForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Remove cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.remove_by_title(&form) {
                Ok(RemoveOutcome::Removed(book)) => {
                    self.set_status(
                        format!("'{}' removed successfully!", book.title),
                        StatusKind::Info,
                    );
                    self.screen = Screen::Books;
                    keep_open = false;
                }
                Ok(RemoveOutcome::NotFound) => {
                    let message = format!("'{}' not found in library.", form.title.trim());
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::RemovingBook(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn remove_by_title(&mut self, form: &RemoveForm) -> Result<RemoveOutcome> {
        let title = form.parse_inputs()?;
        self.store.remove_book(&title)
    }

    fn handle_search(&mut self, code: KeyCode, mut form: SearchForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Search cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Left | KeyCode::Right => {
                if form.active == SearchFormField::By {
                    form.toggle_search_by();
                }
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match form.parse_inputs() {
                Ok(term) => {
                    let books: Vec<Book> = self
                        .store
                        .search(form.field, &term)
                        .into_iter()
                        .cloned()
                        .collect();
                    if books.is_empty() {
                        self.set_status("No matches found.", StatusKind::Error);
                    } else {
                        self.set_status(
                            format!("{} match(es) for '{}'.", books.len(), term),
                            StatusKind::Info,
                        );
                    }
                    self.screen = Screen::SearchResults(SearchResults {
                        field: form.field,
                        term,
                        books,
                    });
                    keep_open = false;
                }
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::Searching(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

/// Extract the most relevant error message from a chained error.
fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}
