//! CLI command handlers

pub mod book;
pub mod config;
