//! Daily quote selection.
//!
//! Picks one quote per calendar day and remembers the pick in a small
//! JSON state file, so every call on the same day returns the same quote:
//!
//! ```json
//! {"last_date": "2024-01-05", "last_quote_index": 3}
//! ```
//!
//! A new day's pick is seeded from the day's ordinal number, so two
//! machines with the same corpus choose the same quote on the same day.
//! The state refers to quotes by position only; reordering the corpus
//! changes what a stored index points at.

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::quotes::{Quote, QuoteError};

/// Index stored when no quote has been picked yet.
pub const NO_PICK: i64 = -1;

/// Source of "today" for selection.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The local calendar date from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stuck on one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// The persisted record of the last daily pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyState {
    /// Day the last pick was made.
    pub last_date: NaiveDate,
    /// Position of the picked quote, or [`NO_PICK`].
    pub last_quote_index: i64,
}

impl DailyState {
    /// A state with no pick, dated `today`.
    pub fn fresh(today: NaiveDate) -> Self {
        Self {
            last_date: today,
            last_quote_index: NO_PICK,
        }
    }

    /// Loads the state at `path`, falling back to a fresh one.
    ///
    /// A missing file, malformed JSON, or missing keys are not errors.
    pub fn load(path: &Path, today: NaiveDate) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => {
                tracing::info!("Initialized new quote state");
                return Self::fresh(today);
            }
        };

        match serde_json::from_str::<Self>(&contents) {
            Ok(state) => {
                tracing::debug!("Loaded state: last quote shown on {}", state.last_date);
                state
            }
            Err(e) => {
                tracing::warn!("Ignoring unreadable quote state {:?}: {}", path, e);
                Self::fresh(today)
            }
        }
    }

    /// Overwrites the state file at `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create state directory {parent:?}"))?;
        }
        let json = serde_json::to_string(self).context("Failed to serialize quote state")?;
        fs::write(path, json).with_context(|| format!("Failed to write quote state {path:?}"))?;
        Ok(())
    }

    /// The picked index for `today`, if there is a usable one.
    fn pick_for(&self, today: NaiveDate, len: usize) -> Option<usize> {
        if self.last_date != today || self.last_quote_index == NO_PICK {
            return None;
        }
        match usize::try_from(self.last_quote_index) {
            Ok(index) if index < len => Some(index),
            _ => {
                tracing::warn!(
                    "Stored quote index {} is out of range for {} quotes, choosing again",
                    self.last_quote_index,
                    len
                );
                None
            }
        }
    }
}

/// Index chosen for `day` from a collection of `len` quotes.
///
/// Depends only on the day and the length. `len` must be non-zero.
pub fn daily_index(day: NaiveDate, len: usize) -> usize {
    let mut rng = StdRng::seed_from_u64(day.num_days_from_ce() as u64);
    rng.gen_range(0..len)
}

/// Chooses and remembers the quote of the day.
pub struct DailySelector<C: Clock = SystemClock> {
    state_path: PathBuf,
    clock: C,
    state: DailyState,
}

impl<C: Clock> DailySelector<C> {
    /// Opens the selector backed by the state file at `state_path`.
    pub fn open(state_path: impl Into<PathBuf>, clock: C) -> Self {
        let state_path = state_path.into();
        let state = DailyState::load(&state_path, clock.today());
        Self {
            state_path,
            clock,
            state,
        }
    }

    /// The last pick as currently known.
    pub fn state(&self) -> DailyState {
        self.state
    }

    /// Returns today's quote.
    ///
    /// The first call on a new day picks a quote and saves the pick; later
    /// calls that day return the same quote without touching the file. A
    /// failed save is logged and the quote is still returned.
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::EmptyCollection` if `quotes` is empty.
    pub fn get_daily_quote<'q>(&mut self, quotes: &'q [Quote]) -> Result<&'q Quote, QuoteError> {
        if quotes.is_empty() {
            return Err(QuoteError::EmptyCollection);
        }

        let today = self.clock.today();
        if let Some(index) = self.state.pick_for(today, quotes.len()) {
            return Ok(&quotes[index]);
        }

        let index = daily_index(today, quotes.len());
        self.state = DailyState {
            last_date: today,
            last_quote_index: index as i64,
        };
        if let Err(e) = self.state.save(&self.state_path) {
            tracing::warn!("Failed to save quote state: {:#}", e);
        }

        let quote = &quotes[index];
        tracing::info!("New daily quote selected: {}", quote.origin);
        Ok(quote)
    }
}

/// Returns a uniformly random quote, ignoring and never touching state.
///
/// # Errors
///
/// Returns `QuoteError::EmptyCollection` if `quotes` is empty.
pub fn get_random_quote(quotes: &[Quote]) -> Result<&Quote, QuoteError> {
    quotes
        .choose(&mut rand::thread_rng())
        .ok_or(QuoteError::EmptyCollection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::{IdSequence, PartialDate, DEFAULT_ORIGIN};
    use tempfile::tempdir;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn collection(n: usize) -> Vec<Quote> {
        let mut ids = IdSequence::new();
        (0..n)
            .map(|i| {
                let content = format!("S: quote {i}");
                Quote::new(content, PartialDate::year(2024), DEFAULT_ORIGIN, &mut ids)
            })
            .collect()
    }

    #[test]
    fn test_same_day_is_idempotent() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("quote_data.json");
        let quotes = collection(50);
        let mut selector = DailySelector::open(&path, FixedClock(day(2024, 3, 14)));

        let first = selector.get_daily_quote(&quotes).expect("Failed to select").clone();
        for _ in 0..5 {
            let again = selector.get_daily_quote(&quotes).expect("Failed to select");
            assert_eq!(again, &first);
        }
    }

    #[test]
    fn test_pick_survives_reopen() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("quote_data.json");
        let quotes = collection(50);
        let clock = FixedClock(day(2024, 3, 14));

        let first = DailySelector::open(&path, clock)
            .get_daily_quote(&quotes)
            .expect("Failed to select")
            .clone();

        let mut reopened = DailySelector::open(&path, clock);
        assert_eq!(reopened.state().last_date, day(2024, 3, 14));
        assert_eq!(reopened.get_daily_quote(&quotes).expect("Failed to select"), &first);
    }

    #[test]
    fn test_same_day_reuses_stored_index_without_rerolling() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("quote_data.json");
        let today = day(2024, 3, 14);
        let quotes = collection(50);

        let stored = (daily_index(today, quotes.len()) + 1) % quotes.len();
        DailyState {
            last_date: today,
            last_quote_index: stored as i64,
        }
        .save(&path)
        .expect("Failed to save state");

        let mut selector = DailySelector::open(&path, FixedClock(today));
        assert_eq!(selector.get_daily_quote(&quotes).expect("Failed to select"), &quotes[stored]);
    }

    #[test]
    fn test_independent_selectors_agree() {
        let a = tempdir().expect("Failed to create temp dir");
        let b = tempdir().expect("Failed to create temp dir");
        let quotes = collection(37);
        let clock = FixedClock(day(2025, 7, 1));

        let mut first = DailySelector::open(a.path().join("state.json"), clock);
        let mut second = DailySelector::open(b.path().join("state.json"), clock);

        assert_eq!(
            first.get_daily_quote(&quotes).expect("Failed to select").id,
            second.get_daily_quote(&quotes).expect("Failed to select").id
        );
    }

    #[test]
    fn test_new_day_persists_new_pick() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("quote_data.json");
        let quotes = collection(20);

        DailySelector::open(&path, FixedClock(day(2024, 1, 1)))
            .get_daily_quote(&quotes)
            .expect("Failed to select");

        let tomorrow = day(2024, 1, 2);
        let mut selector = DailySelector::open(&path, FixedClock(tomorrow));
        let quote = selector.get_daily_quote(&quotes).expect("Failed to select");
        assert_eq!(quote, &quotes[daily_index(tomorrow, quotes.len())]);

        let saved = DailyState::load(&path, tomorrow);
        assert_eq!(saved.last_date, tomorrow);
        assert_eq!(saved.last_quote_index, daily_index(tomorrow, quotes.len()) as i64);
    }

    #[test]
    fn test_sentinel_forces_roll() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("quote_data.json");
        let today = day(2024, 6, 6);
        let quotes = collection(10);
        DailyState::fresh(today).save(&path).expect("Failed to save state");

        let mut selector = DailySelector::open(&path, FixedClock(today));
        selector.get_daily_quote(&quotes).expect("Failed to select");

        let saved = DailyState::load(&path, today);
        assert_eq!(saved.last_quote_index, daily_index(today, quotes.len()) as i64);
    }

    #[test]
    fn test_corrupt_state_starts_fresh() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("quote_data.json");
        fs::write(&path, r#"{"last_date": "2024-01-01"}"#).expect("Failed to write");

        let state = DailyState::load(&path, day(2024, 2, 2));
        assert_eq!(state, DailyState::fresh(day(2024, 2, 2)));
    }

    #[test]
    fn test_out_of_range_index_rerolls() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("quote_data.json");
        let today = day(2024, 6, 6);
        DailyState {
            last_date: today,
            last_quote_index: 500,
        }
        .save(&path)
        .expect("Failed to save state");

        let quotes = collection(3);
        let mut selector = DailySelector::open(&path, FixedClock(today));
        let quote = selector.get_daily_quote(&quotes).expect("Failed to select");
        assert_eq!(quote, &quotes[daily_index(today, 3)]);
    }

    #[test]
    fn test_state_file_shape() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("quote_data.json");
        DailyState {
            last_date: day(2024, 1, 5),
            last_quote_index: 3,
        }
        .save(&path)
        .expect("Failed to save state");

        let contents = fs::read_to_string(&path).expect("Failed to read");
        let raw: serde_json::Value = serde_json::from_str(&contents).expect("Invalid JSON");
        assert_eq!(raw["last_date"], "2024-01-05");
        assert_eq!(raw["last_quote_index"], 3);
    }

    #[test]
    fn test_empty_collection_errors() {
        let dir = tempdir().expect("Failed to create temp dir");
        let clock = FixedClock(day(2024, 1, 1));
        let mut selector = DailySelector::open(dir.path().join("s.json"), clock);
        assert!(matches!(selector.get_daily_quote(&[]), Err(QuoteError::EmptyCollection)));
        assert!(matches!(get_random_quote(&[]), Err(QuoteError::EmptyCollection)));
    }

    #[test]
    fn test_random_quote_comes_from_collection() {
        let quotes = collection(5);
        for _ in 0..20 {
            let quote = get_random_quote(&quotes).expect("Failed to select");
            assert!(quotes.contains(quote));
        }
    }

    #[test]
    fn test_daily_index_in_range() {
        for offset in 0..100 {
            let d = day(2024, 1, 1) + chrono::Duration::days(offset);
            assert!(daily_index(d, 7) < 7);
        }
    }
}
