//! CLI commands for daily-quote.
//!
//! Each submodule implements a single CLI command with its argument
//! parsing and execution logic.

/// Shell completion scripts.
pub mod completions;

/// Configuration viewing and management.
pub mod config;

/// Start, stop, and inspect the scheduler daemon.
pub mod daemon;

/// List quotes in the corpus.
pub mod list;

/// Send today's quote as a notification.
pub mod notify;

/// Show a random quote.
pub mod random;

/// Show corpus, snapshot, and daemon status.
pub mod status;

/// Reconcile the corpus with the snapshot.
pub mod sync;

/// Show the quote of the day.
pub mod today;
