//! Parser for the plain-text quote corpus.
//!
//! The corpus is a flat file of blocks separated by blank lines. Some
//! blocks are date headers that move a running "current date" forward,
//! others are quotes stamped with whatever date is current when they
//! are read:
//!
//! ```text
//! 2024
//!
//! Jan 05
//!
//! S: Hello world
//!
//! "Another one"
//! ```
//!
//! Blocks that are neither headers nor quotes are skipped.

use std::fs;
use std::path::Path;

use super::models::{month_number, IdSequence, PartialDate, Quote, MONTHS};
use super::QuoteError;

/// Year assumed for quotes that appear before any year header.
pub const DEFAULT_YEAR: i32 = 2022;

/// Prefixes that mark a block as quote content.
pub const CONTENT_MARKERS: [&str; 3] = ["S: ", "\"", "["];

/// The running date context carried from block to block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserContext {
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl Default for ParserContext {
    fn default() -> Self {
        Self {
            year: DEFAULT_YEAR,
            month: None,
            day: None,
        }
    }
}

impl ParserContext {
    /// Applies the header rules to `block`, in priority order.
    ///
    /// A year header resets the date to January 1st of that year. A month
    /// header sets the month and reads the day from characters 4..6.
    pub fn advance(&mut self, block: &str) {
        if block.starts_with("20") {
            match parse_year(block) {
                Some(year) => {
                    self.year = year;
                    self.month = Some(1);
                    self.day = Some(1);
                }
                None => tracing::debug!("Ignoring malformed year header: {:?}", first_line(block)),
            }
        }

        if let Some(month) = MONTHS.iter().find(|m| block.starts_with(*m)) {
            self.month = month_number(month);
            self.day = parse_day(block);
            if self.day.is_none() {
                tracing::debug!("Month header without a day: {:?}", first_line(block));
            }
        }
    }

    /// The date a quote read right now would carry.
    pub fn date(&self) -> PartialDate {
        PartialDate::new(self.year, self.month, self.day)
    }
}

/// Returns true if `block` starts with one of the content markers.
pub fn is_content(block: &str) -> bool {
    CONTENT_MARKERS.iter().any(|marker| block.starts_with(marker))
}

/// Parses corpus text into quotes, in corpus order.
///
/// Header checks run before the content check on every block, and a
/// block may match both: it then updates the context and is also
/// recorded as a quote carrying the updated date.
pub fn parse(text: &str, origin: &str, ids: &mut IdSequence) -> Vec<Quote> {
    let text = text.replace("\r\n", "\n");
    let mut context = ParserContext::default();
    let mut quotes = Vec::new();

    for block in text.split("\n\n") {
        context.advance(block);

        if is_content(block) {
            quotes.push(Quote::new(block.trim_end(), context.date(), origin, ids));
        }
    }

    tracing::debug!("Parsed {} quotes", quotes.len());
    quotes
}

/// Reads and parses the corpus file at `path`.
///
/// # Errors
///
/// Returns `QuoteError::CorpusRead` if the file is missing, unreadable,
/// or not valid UTF-8.
pub fn parse_file(
    path: &Path,
    origin: &str,
    ids: &mut IdSequence,
) -> Result<Vec<Quote>, QuoteError> {
    let text = fs::read_to_string(path).map_err(|source| QuoteError::CorpusRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse(&text, origin, ids))
}

fn first_line(block: &str) -> &str {
    block.lines().next().unwrap_or("")
}

fn parse_year(block: &str) -> Option<i32> {
    first_line(block).trim().parse().ok()
}

fn parse_day(block: &str) -> Option<u32> {
    let slice: String = block.chars().skip(4).take(2).collect();
    slice.trim().parse().ok().filter(|day| (1..=31).contains(day))
}
