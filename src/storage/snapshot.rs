//! Quote snapshot reconciliation.
//!
//! The snapshot is a JSON copy of the last parsed corpus:
//!
//! ```json
//! {"quotes": [{"content": "S: hi", "date": [2024, 1, 5], "origin": "...", "id": 0}]}
//! ```
//!
//! Every run compares the fresh parse against it, reports when the number
//! of quotes changed, and rewrites it from the fresh parse.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::quotes::{Divergence, Quote};

/// On-disk wrapper around the quote list.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    quotes: Vec<Quote>,
}

/// Borrowing twin of [`Snapshot`] used for writing.
#[derive(Serialize)]
struct SnapshotRef<'a> {
    quotes: &'a [Quote],
}

/// The result of reconciling a fresh parse against the stored snapshot.
#[derive(Debug, Clone)]
pub struct Reconciled {
    /// The collection to use from here on (the fresh parse).
    pub quotes: Vec<Quote>,
    /// Quotes restored from the snapshot before it was rewritten.
    pub previous: Vec<Quote>,
    /// Set when the quote count changed since the last snapshot.
    pub divergence: Option<Divergence>,
}

impl Reconciled {
    /// Quotes in the fresh parse whose text was not in the snapshot.
    pub fn added(&self) -> Vec<&Quote> {
        let before: HashSet<&str> = self.previous.iter().map(|q| q.content.as_str()).collect();
        self.quotes
            .iter()
            .filter(|q| !before.contains(q.content.as_str()))
            .collect()
    }

    /// Snapshot quotes whose text is no longer in the corpus.
    pub fn removed(&self) -> Vec<&Quote> {
        let now: HashSet<&str> = self.quotes.iter().map(|q| q.content.as_str()).collect();
        self.previous
            .iter()
            .filter(|q| !now.contains(q.content.as_str()))
            .collect()
    }
}

/// Loads quotes from the snapshot at `path`.
///
/// A missing file, invalid JSON, or a payload without the `quotes` key all
/// count as an empty snapshot. Stored ids are kept as they were written.
pub fn load_snapshot(path: &Path) -> Vec<Quote> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::info!("No quote snapshot at {:?} ({}), starting empty", path, e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Snapshot>(&contents) {
        Ok(snapshot) => snapshot.quotes,
        Err(e) => {
            tracing::warn!("Ignoring unreadable quote snapshot {:?}: {}", path, e);
            Vec::new()
        }
    }
}

/// Overwrites the snapshot at `path` with `quotes`.
///
/// Creates the parent directory if needed.
pub fn write_snapshot(path: &Path, quotes: &[Quote]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create snapshot directory {parent:?}"))?;
    }

    let json = serde_json::to_string_pretty(&SnapshotRef { quotes })
        .context("Failed to serialize quote snapshot")?;
    fs::write(path, json).with_context(|| format!("Failed to write quote snapshot {path:?}"))?;

    Ok(())
}

/// Reconciles `fresh` against the snapshot at `path`.
///
/// The snapshot is always rewritten from `fresh`, so the stored ids track
/// the latest parse. When the counts differ the result carries a
/// [`Divergence`]. Reporting it is left to the caller, which decides
/// whether it is a warning or an error.
///
/// # Errors
///
/// Returns an error only if the snapshot cannot be written.
pub fn reconcile(fresh: Vec<Quote>, path: &Path) -> Result<Reconciled> {
    let previous = load_snapshot(path);

    let divergence = (fresh.len() != previous.len()).then(|| Divergence {
        parsed: fresh.len(),
        persisted: previous.len(),
    });

    write_snapshot(path, &fresh)?;
    tracing::debug!("Wrote {} quotes to {:?}", fresh.len(), path);

    Ok(Reconciled {
        quotes: fresh,
        previous,
        divergence,
    })
}
