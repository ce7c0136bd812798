//! Sync command - reconcile the corpus with the stored snapshot.
//!
//! Reports how many quotes were parsed and stored, and which quotes
//! were added to or removed from the corpus since the last run.

use anyhow::Result;
use colored::Colorize;

use daily_quote::config::Config;
use daily_quote::quotes::QuoteError;
use daily_quote::storage::load_collection;

/// Arguments for the sync command.
#[derive(clap::Args)]
pub struct Args {
    /// Exit with an error if the number of quotes changed
    #[arg(long)]
    pub strict: bool,
}

/// Executes the sync command.
///
/// The snapshot is rewritten before anything is reported, including
/// in strict mode.
pub fn run(args: Args, config: &Config) -> Result<()> {
    let collection = load_collection(config)?;

    println!("{}", "Quote corpus".bold());
    println!("  {}  {}", "Corpus:".dimmed(), config.corpus_path().display());
    println!("  {}  {}", "Parsed:".dimmed(), collection.quotes.len());
    println!("  {}  {}", "Previously stored:".dimmed(), collection.previous.len());

    let added = collection.added();
    if !added.is_empty() {
        println!();
        println!("{}", format!("Added ({}):", added.len()).green().bold());
        for quote in added {
            println!("  {} {}", "+".green(), quote);
        }
    }

    let removed = collection.removed();
    if !removed.is_empty() {
        println!();
        println!("{}", format!("Removed ({}):", removed.len()).red().bold());
        for quote in removed {
            println!("  {} {}", "-".red(), quote);
        }
    }

    println!();
    match collection.divergence {
        Some(divergence) if args.strict => return Err(QuoteError::from(divergence).into()),
        Some(divergence) => println!("{} {}", "Warning:".yellow(), divergence),
        None => println!("{}", "Snapshot is up to date".green()),
    }

    Ok(())
}
