//! Output formatting utilities for CLI commands.
//!
//! Provides a unified `OutputFormat` enum and the quote renderings
//! shared by the commands that print quotes.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;

use daily_quote::quotes::Quote;

/// Width of the banner around a printed quote.
const BANNER_WIDTH: usize = 60;

/// Output format options for CLI commands.
///
/// - `Text` for human-readable terminal output (default)
/// - `Json` for machine-readable output and scripting
/// - `Markdown` for pasting into notes and documents
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default).
    #[default]
    Text,
    /// Machine-readable JSON output.
    Json,
    /// Markdown blockquote output.
    Markdown,
}

/// Renders a quote as a markdown blockquote with attribution.
pub fn quote_markdown(quote: &Quote) -> String {
    let mut out = String::new();
    for line in quote.content.lines() {
        out.push_str("> ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(">\n");
    out.push_str(&format!("> -- {}, {}\n", quote.origin, quote.date));
    out
}

/// Prints a single quote under `heading` in the chosen format.
pub fn print_quote(quote: &Quote, heading: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            let rule = "=".repeat(BANNER_WIDTH);
            println!();
            println!("{}", rule.dimmed());
            println!("{}", heading.bold());
            println!("{}", rule.dimmed());
            println!("{}", quote.content);
            println!("  {} {}, {}", "--".dimmed(), quote.origin.cyan(), quote.date);
            println!("{}", rule.dimmed());
            println!();
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(quote)?);
        }
        OutputFormat::Markdown => {
            print!("{}", quote_markdown(quote));
        }
    }
    Ok(())
}
