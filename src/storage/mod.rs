//! Storage layer for daily-quote
//!
//! Two small JSON files sit next to the config: the quote snapshot
//! (`quotes.json`) and the daily pick (`quote_data.json`).

pub mod daily;
pub mod snapshot;

use anyhow::Result;

use crate::config::Config;
use crate::quotes::{parse_file, IdSequence};

pub use daily::{get_random_quote, Clock, DailySelector, DailyState, FixedClock, SystemClock};
pub use snapshot::{load_snapshot, reconcile, write_snapshot, Reconciled};

/// Parses the configured corpus and reconciles it against the snapshot.
///
/// # Errors
///
/// Fails if the corpus cannot be read or the snapshot cannot be written.
/// A changed quote count is reported through `Reconciled::divergence`.
pub fn load_collection(config: &Config) -> Result<Reconciled> {
    let corpus = config.corpus_path();
    let fresh = parse_file(&corpus, &config.origin, &mut IdSequence::new())?;
    tracing::debug!("Loaded {} quotes from {:?}", fresh.len(), corpus);
    reconcile(fresh, &Config::snapshot_path()?)
}

/// Opens the daily selector on the default state file.
pub fn open_selector() -> Result<DailySelector> {
    Ok(DailySelector::open(Config::state_path()?, SystemClock))
}
