//! Core data models for quotes.
//!
//! A [`Quote`] is one entry from the corpus together with the (possibly
//! partial) date it was said and who said it. Quotes are immutable once
//! built; the only way to get a specific `id` is to restore one from a
//! persisted snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribution used when the corpus does not name a speaker.
pub const DEFAULT_ORIGIN: &str = "Jordi A. Navarrette";

/// Shortest message [`Quote::truncated`] will produce when cutting.
pub const MIN_MESSAGE_CHARS: usize = 4;

/// Three-letter month abbreviations, January first.
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Returns the 1-based month number for a three-letter abbreviation.
pub fn month_number(abbrev: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| *m == abbrev)
        .map(|i| i as u32 + 1)
}

/// Returns the abbreviation for a 1-based month number.
pub fn month_abbrev(month: u32) -> Option<&'static str> {
    MONTHS.get((month as usize).checked_sub(1)?).copied()
}

/// A date where the month and day may be unknown.
///
/// A year of 0 means the year is unknown too. Serialized as the JSON
/// array `[year, month|null, day|null]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "(i32, Option<u32>, Option<u32>)", into = "(i32, Option<u32>, Option<u32>)")]
pub struct PartialDate {
    /// Year, or 0 when unknown.
    pub year: i32,
    /// Month in 1..=12.
    pub month: Option<u32>,
    /// Day of month in 1..=31. Only set when `month` is set.
    pub day: Option<u32>,
}

impl PartialDate {
    pub fn new(year: i32, month: Option<u32>, day: Option<u32>) -> Self {
        Self { year, month, day }
    }

    /// A date with only the year known.
    pub fn year(year: i32) -> Self {
        Self::new(year, None, None)
    }
}

impl From<(i32, Option<u32>, Option<u32>)> for PartialDate {
    fn from((year, month, day): (i32, Option<u32>, Option<u32>)) -> Self {
        Self { year, month, day }
    }
}

impl From<PartialDate> for (i32, Option<u32>, Option<u32>) {
    fn from(date: PartialDate) -> Self {
        (date.year, date.month, date.day)
    }
}

impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year == 0 {
            return write!(f, "n.d.");
        }
        match self.month.and_then(month_abbrev) {
            Some(month) => {
                write!(f, "{month}")?;
                if let Some(day) = self.day {
                    write!(f, " {day},")?;
                }
            }
            None => write!(f, "n.d.,")?,
        }
        write!(f, " {}", self.year)
    }
}

/// Hands out quote ids in increasing order.
///
/// One sequence is owned per collection being built, so ids are unique
/// within a parse but carry no meaning across parses.
#[derive(Debug, Default)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the sequence at `start`.
    pub fn starting_at(start: u64) -> Self {
        Self { next: start }
    }

    /// Returns the next id and advances the sequence.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// A single quote from the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// The quote text, including any speaker tag.
    pub content: String,

    /// When the quote was said, as precisely as the corpus knows.
    pub date: PartialDate,

    /// Who said it
    pub origin: String,

    /// Identifier assigned at construction time
    pub id: u64,
}

impl Quote {
    /// Builds a quote, drawing a fresh id from `ids`.
    pub fn new(
        content: impl Into<String>,
        date: PartialDate,
        origin: impl Into<String>,
        ids: &mut IdSequence,
    ) -> Self {
        Self {
            content: content.into(),
            date,
            origin: origin.into(),
            id: ids.next_id(),
        }
    }

    /// Renders the quote for a notification body.
    ///
    /// Anything longer than `max_chars` characters is cut short and ends
    /// with `...`, so the result never exceeds `max_chars`. Limits below
    /// [`MIN_MESSAGE_CHARS`] are raised to it.
    pub fn truncated(&self, max_chars: usize) -> String {
        let max_chars = max_chars.max(MIN_MESSAGE_CHARS);
        let full = self.to_string();
        if full.chars().count() <= max_chars {
            return full;
        }
        let keep = max_chars - 3;
        let mut short: String = full.chars().take(keep).collect();
        short.push_str("...");
        short
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {}, {}", self.content, self.origin, self.date)
    }
}
