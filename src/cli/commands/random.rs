//! Random command - show any quote.

use anyhow::Result;

use daily_quote::config::Config;
use daily_quote::storage::get_random_quote;

use crate::cli::format::print_quote;
use crate::cli::{load_quotes, OutputFormat};

/// Arguments for the random command.
#[derive(clap::Args)]
pub struct Args {
    /// Output format: text (default), json, or markdown
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the random command. Never touches the daily pick.
pub fn run(args: Args, config: &Config) -> Result<()> {
    let collection = load_quotes(config)?;
    let quote = get_random_quote(&collection.quotes)?;
    print_quote(quote, "RANDOM QUOTE", args.format)
}
