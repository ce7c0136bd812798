//! Today command - show the quote of the day.
//!
//! The first run on a new day picks a quote and remembers it, so every
//! later run that day (and the daemon) shows the same one.

use anyhow::Result;

use daily_quote::config::Config;
use daily_quote::notify::{notifier, TITLE};
use daily_quote::storage::open_selector;

use crate::cli::format::print_quote;
use crate::cli::{load_quotes, OutputFormat};

/// Arguments for the today command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    dailyquote today                Show today's quote\n    \
    dailyquote today --notify       Also send it as a notification\n    \
    dailyquote today -f json        Output as JSON")]
pub struct Args {
    /// Also deliver the quote as a desktop notification
    #[arg(long)]
    pub notify: bool,

    /// Output format: text (default), json, or markdown
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the today command.
pub fn run(args: Args, config: &Config) -> Result<()> {
    let collection = load_quotes(config)?;
    let mut selector = open_selector()?;
    let quote = selector.get_daily_quote(&collection.quotes)?;

    print_quote(quote, "DAILY QUOTE", args.format)?;

    if args.notify {
        notifier(config.notifications).notify(
            TITLE,
            &quote.truncated(config.max_message_chars),
            &quote.origin,
        )?;
    }

    Ok(())
}
