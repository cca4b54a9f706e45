//! Libris TUI
//!
//! Terminal user interface for the book library.
//!
//! ## Layout
//!
//! Two-pane layout plus a footer:
//! - Left: the five-entry menu
//! - Right: content for the selected view (library, search results, stats)
//! - Footer: status message and key hints
//!
//! ## Navigation
//!
//! - ↑/↓: Move the menu selection
//! - Enter: Run the selected menu entry
//! - q or Esc: Quit
//!
//! Add, remove, and search open a modal form over the content pane. Forms use
//! Tab to switch fields, Enter to submit, and Esc to cancel.

mod app;
mod forms;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use libris_core::{Config, Store};

use app::App;

/// Run the TUI application
pub fn run() -> Result<()> {
    // Open the store
    let store = Store::open()?;

    // Initialize TUI logging (file-based, only if LIBRIS_LOG is set)
    init_tui_logging(store.config());

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Run app
    let mut app = App::new(store);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(250)).context("event polling failed")? {
            if let Event::Key(key_event) = event::read().context("failed to read event")? {
                if key_event.kind == KeyEventKind::Press && app.handle_key(key_event.code)? {
                    return Ok(());
                }
            }
        }
    }
}

fn init_tui_logging(config: &Config) {
    // Only log if LIBRIS_LOG is set
    let Ok(log_level) = std::env::var("LIBRIS_LOG") else {
        return;
    };

    // Determine log file path
    let log_path = config
        .log_file
        .clone()
        .unwrap_or_else(|| config.data_dir.join("debug.log"));

    // Create log file
    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!("libris_core={},libris_cli={}", log_level, log_level));

    // Initialize file-based logging (ignore error if already initialized)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}
