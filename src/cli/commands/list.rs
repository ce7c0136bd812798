//! List command - show every quote in the corpus.
//!
//! Quotes are listed in corpus order and can be narrowed down to a
//! single year.

use anyhow::Result;
use colored::Colorize;

use daily_quote::config::Config;
use daily_quote::quotes::Quote;

use crate::cli::format::quote_markdown;
use crate::cli::{load_quotes, OutputFormat};

/// Longest first line shown per quote in text output.
const PREVIEW_CHARS: usize = 70;

/// Arguments for the list command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    dailyquote list                 List all quotes\n    \
    dailyquote list --year 2024     Only quotes from 2024\n    \
    dailyquote list -f json         Output as JSON")]
pub struct Args {
    /// Only show quotes from this year
    #[arg(short, long, value_name = "YEAR")]
    pub year: Option<i32>,

    /// Output format: text (default), json, or markdown
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the list command.
pub fn run(args: Args, config: &Config) -> Result<()> {
    let collection = load_quotes(config)?;
    let quotes = filter_by_year(&collection.quotes, args.year);

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&quotes)?);
        }
        OutputFormat::Markdown => {
            for quote in &quotes {
                println!("{}", quote_markdown(quote));
            }
        }
        OutputFormat::Text => {
            if quotes.is_empty() {
                println!("{}", "No quotes found".yellow());
                return Ok(());
            }
            for quote in &quotes {
                println!(
                    "{:>5}  {:14}  {}",
                    quote.id.to_string().cyan(),
                    quote.date.to_string().dimmed(),
                    preview(&quote.content, PREVIEW_CHARS)
                );
            }
            println!();
            println!("{}", format!("{} quotes", quotes.len()).dimmed());
        }
    }

    Ok(())
}

/// Quotes from `year`, or all of them.
fn filter_by_year(quotes: &[Quote], year: Option<i32>) -> Vec<&Quote> {
    quotes
        .iter()
        .filter(|q| year.is_none_or(|y| q.date.year == y))
        .collect()
}

/// First line of `content`, cut to `max_chars` characters.
fn preview(content: &str, max_chars: usize) -> String {
    let first = content.lines().next().unwrap_or("");
    let more = content.lines().nth(1).is_some();
    if first.chars().count() > max_chars {
        let cut: String = first.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{cut}...")
    } else if more {
        format!("{first} ...")
    } else {
        first.to_string()
    }
}
