//! Quotes and the corpus they come from.

pub mod models;
pub mod parser;

use std::path::PathBuf;

pub use models::{IdSequence, PartialDate, Quote, DEFAULT_ORIGIN, MIN_MESSAGE_CHARS};
pub use parser::{parse, parse_file};

/// Errors produced while reading or choosing quotes.
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    /// The corpus file could not be read.
    #[error("Failed to read quote corpus {path:?}: {source}")]
    CorpusRead {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A quote was requested from a collection with no quotes in it.
    #[error("No quotes to choose from. Check that the corpus has quote blocks.")]
    EmptyCollection,

    /// The corpus and the stored snapshot disagree on the number of quotes.
    #[error(transparent)]
    Diverged(#[from] Divergence),
}

/// The freshly parsed corpus holds a different number of quotes than the
/// stored snapshot did.
///
/// This is a signal, not a failure: by the time a caller sees it the
/// snapshot has already been rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Quote corpus changed: {parsed} quotes parsed, {persisted} in snapshot")]
pub struct Divergence {
    pub parsed: usize,
    pub persisted: usize,
}
