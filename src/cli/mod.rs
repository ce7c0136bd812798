//! Command-line interface for daily-quote.
//!
//! Provides the CLI commands for showing, listing, and delivering
//! quotes, and for managing configuration and the scheduler daemon.

/// Individual CLI command implementations.
pub mod commands;

/// Output format handling shared by commands.
pub mod format;

pub use format::OutputFormat;

use anyhow::Result;
use colored::Colorize;

use daily_quote::config::Config;
use daily_quote::storage::{load_collection, Reconciled};

/// Loads and reconciles the corpus, warning on stderr if it changed.
pub fn load_quotes(config: &Config) -> Result<Reconciled> {
    let collection = load_collection(config)?;
    if let Some(divergence) = collection.divergence {
        eprintln!("{} {}", "Warning:".yellow(), divergence);
    }
    Ok(collection)
}
