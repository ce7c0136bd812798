//! daily-quote - a quote of the day from a plain-text corpus
//!
//! Parses a corpus of dated quotes, keeps a JSON snapshot of it to notice
//! when quotes are added or removed, and picks one quote per calendar
//! day that stays the same no matter how often it is asked for.

pub mod config;
pub mod notify;
pub mod quotes;
pub mod storage;
