//! Libris CLI
//!
//! Command-line interface for libris - personal book library tracking.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use libris_core::{SearchField, Store};

mod commands;
mod output;
mod tui;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "libris")]
#[command(about = "Libris - Personal book library tracking")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// Add a book to the library
    Add {
        /// Book title
        title: String,
        /// Book author
        #[arg(short, long)]
        author: String,
        /// Publication year (0-9999)
        #[arg(short, long, default_value_t = 0)]
        year: u16,
        /// Genre
        #[arg(short, long)]
        genre: String,
        /// Mark the book as already read
        #[arg(long)]
        read: bool,
    },
    /// Remove the first book whose title matches (case-insensitive)
    #[command(alias = "rm")]
    Remove {
        /// Title of the book to remove
        title: String,
    },
    /// Search books by title or author
    Search {
        /// Search term (case-insensitive substring)
        term: String,
        /// Field to match against
        #[arg(short, long, value_enum, default_value = "title")]
        by: SearchBy,
    },
    /// List all books in the library
    #[command(alias = "ls")]
    List,
    /// Show library statistics
    Stats,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

/// Field a search matches against
#[derive(ValueEnum, Clone, Copy)]
enum SearchBy {
    Title,
    Author,
}

impl From<SearchBy> for SearchField {
    fn from(value: SearchBy) -> Self {
        match value {
            SearchBy::Title => SearchField::Title,
            SearchBy::Author => SearchField::Author,
        }
    }
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, library_file, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config works without the store so it can point at a fresh data dir
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), &output);
    }

    // Handle TUI (default when no command given)
    if matches!(&cli.command, Some(Commands::Tui) | None) {
        return tui::run();
    }

    // Open store for commands that need it
    let mut store = Store::open()?;

    match cli.command.unwrap() {
        Commands::Tui => unreachable!(),           // Handled above
        Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Add {
            title,
            author,
            year,
            genre,
            read,
        } => commands::book::add(&mut store, title, author, year, genre, read, &output),
        Commands::Remove { title } => commands::book::remove(&mut store, title, &output),
        Commands::Search { term, by } => commands::book::search(&store, by.into(), term, &output),
        Commands::List => commands::book::list(&store, &output),
        Commands::Stats => commands::book::stats(&store, &output),
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}
