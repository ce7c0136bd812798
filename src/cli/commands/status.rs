//! Status command - show the current daily-quote state.
//!
//! Displays where the corpus and state files live, how many quotes the
//! corpus and snapshot hold, the current daily pick, and whether the
//! scheduler daemon is running. Never modifies any file.

use anyhow::Result;
use colored::Colorize;

use daily_quote::config::Config;
use daily_quote::quotes::{parse_file, IdSequence};
use daily_quote::storage::daily::NO_PICK;
use daily_quote::storage::{load_snapshot, DailyState, SystemClock, Clock};

use crate::daemon::DaemonState;

/// Executes the status command.
pub fn run(config: &Config) -> Result<()> {
    println!("{}", "Daily Quote".bold().cyan());
    println!();

    let corpus = config.corpus_path();
    println!("  {}  {}", "Corpus:".dimmed(), corpus.display());
    match parse_file(&corpus, &config.origin, &mut IdSequence::new()) {
        Ok(quotes) => println!("  {}  {}", "Quotes:".dimmed(), quotes.len()),
        Err(e) => println!("  {}  {}", "Quotes:".dimmed(), e.to_string().red()),
    }

    let snapshot_path = Config::snapshot_path()?;
    let stored = load_snapshot(&snapshot_path);
    println!(
        "  {}  {} ({})",
        "Snapshot:".dimmed(),
        stored.len(),
        snapshot_path.display()
    );

    let today = SystemClock.today();
    let state = DailyState::load(&Config::state_path()?, today);
    println!();
    println!("{}", "Daily pick:".bold());
    if state.last_quote_index == NO_PICK {
        println!("  {}", "No quote picked yet".dimmed());
    } else {
        let when = if state.last_date == today {
            "today".green().to_string()
        } else {
            state.last_date.to_string()
        };
        println!("  Quote #{} ({})", state.last_quote_index, when);
    }

    let daemon = DaemonState::new()?;
    println!();
    println!("{}", "Daemon:".bold());
    if daemon.is_running() {
        println!(
            "  {} (PID {})",
            "running".green(),
            daemon.get_pid().unwrap_or(0)
        );
    } else {
        println!("  {}", "not running".yellow());
    }

    Ok(())
}
