//! Notify command - send today's quote as a desktop notification.
//!
//! Useful to check that notifications work before starting the daemon.

use anyhow::Result;
use colored::Colorize;

use daily_quote::config::Config;
use daily_quote::notify::{DesktopNotifier, Notifier, TITLE};
use daily_quote::storage::open_selector;

use crate::cli::load_quotes;

/// Executes the notify command.
///
/// Always uses the desktop notifier, even if notifications are disabled
/// in the config.
pub fn run(config: &Config) -> Result<()> {
    let collection = load_quotes(config)?;
    let mut selector = open_selector()?;
    let quote = selector.get_daily_quote(&collection.quotes)?;

    DesktopNotifier.notify(
        TITLE,
        &quote.truncated(config.max_message_chars),
        &quote.origin,
    )?;
    println!("{}", "Notification sent".green());

    Ok(())
}
