//! Integration tests for daily-quote
//!
//! The first half drives the library the way the CLI does, against
//! temporary corpus and state files. The second half runs the
//! `dailyquote` binary with `DAILYQUOTE_HOME` pointed at a temp dir.

use assert_cmd::Command;
use chrono::NaiveDate;
use daily_quote::quotes::{parse_file, IdSequence, PartialDate, QuoteError, DEFAULT_ORIGIN};
use daily_quote::storage::{load_snapshot, reconcile, DailySelector, FixedClock};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

// =============================================================================
// Test Helpers
// =============================================================================

const CORPUS: &str = "\
2023

Mar 10

S: The first one

\"Quoted speech\"

Just a note, not a quote

2024

Jan 05

S: Hello world
J: and a reply

[stage direction]

Feb 29

S: Leap day
";

/// Writes `text` as the corpus in `dir` and returns its path.
fn write_corpus(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("quotes.txt");
    fs::write(&path, text).expect("Failed to write corpus");
    path
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// A `dailyquote` command isolated in `home`, reading `corpus`.
fn dailyquote(home: &TempDir, corpus: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dailyquote").expect("Failed to find binary");
    cmd.env("DAILYQUOTE_HOME", home.path())
        .env_remove("DAILYQUOTE_CORPUS")
        .env("NO_COLOR", "1")
        .arg("--corpus")
        .arg(corpus);
    cmd
}

// =============================================================================
// Library Pipeline Tests
// =============================================================================

mod pipeline_tests {
    use super::*;

    #[test]
    fn test_parse_corpus_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let corpus = write_corpus(dir.path(), CORPUS);

        let quotes = parse_file(&corpus, DEFAULT_ORIGIN, &mut IdSequence::new())
            .expect("Failed to parse corpus");

        assert_eq!(quotes.len(), 5);
        assert_eq!(quotes[0].date, PartialDate::new(2023, Some(3), Some(10)));
        assert_eq!(quotes[1].content, "\"Quoted speech\"");
        assert_eq!(quotes[2].content, "S: Hello world\nJ: and a reply");
        assert_eq!(quotes[2].date, PartialDate::new(2024, Some(1), Some(5)));
        assert_eq!(quotes[3].date, PartialDate::new(2024, Some(1), Some(5)));
        assert_eq!(quotes[4].date, PartialDate::new(2024, Some(2), Some(29)));
    }

    #[test]
    fn test_corpus_drift_detected_and_snapshot_rewritten() {
        let dir = tempdir().expect("Failed to create temp dir");
        let corpus = write_corpus(dir.path(), CORPUS);
        let snapshot = dir.path().join("quotes.json");

        let first = parse_file(&corpus, DEFAULT_ORIGIN, &mut IdSequence::new())
            .expect("Failed to parse corpus");
        reconcile(first, &snapshot).expect("Failed to reconcile");

        let unchanged = parse_file(&corpus, DEFAULT_ORIGIN, &mut IdSequence::new())
            .expect("Failed to parse corpus");
        let result = reconcile(unchanged, &snapshot).expect("Failed to reconcile");
        assert!(result.divergence.is_none(), "Same corpus should not diverge");

        write_corpus(dir.path(), &format!("{CORPUS}\nS: A brand new one\n"));
        let grown = parse_file(&corpus, DEFAULT_ORIGIN, &mut IdSequence::new())
            .expect("Failed to parse corpus");
        let result = reconcile(grown, &snapshot).expect("Failed to reconcile");

        let divergence = result.divergence.expect("Growing the corpus should diverge");
        assert_eq!(divergence.parsed, 6);
        assert_eq!(divergence.persisted, 5);
        assert_eq!(load_snapshot(&snapshot).len(), 6);
        assert_eq!(result.added().len(), 1);
        assert_eq!(result.added()[0].content, "S: A brand new one");
    }

    #[test]
    fn test_daily_quote_stable_across_runs() {
        let dir = tempdir().expect("Failed to create temp dir");
        let corpus = write_corpus(dir.path(), CORPUS);
        let state = dir.path().join("quote_data.json");
        let clock = FixedClock(day(2024, 5, 1));

        let quotes = parse_file(&corpus, DEFAULT_ORIGIN, &mut IdSequence::new())
            .expect("Failed to parse corpus");

        let first = DailySelector::open(&state, clock)
            .get_daily_quote(&quotes)
            .expect("Failed to select")
            .content
            .clone();

        // A new process re-parses and gets fresh ids, but the same quote
        let reparsed = parse_file(&corpus, DEFAULT_ORIGIN, &mut IdSequence::starting_at(1000))
            .expect("Failed to parse corpus");
        let second = DailySelector::open(&state, clock)
            .get_daily_quote(&reparsed)
            .expect("Failed to select")
            .content
            .clone();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_corpus_is_an_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let absent = dir.path().join("absent.txt");
        let result = parse_file(&absent, DEFAULT_ORIGIN, &mut IdSequence::new());
        assert!(matches!(result, Err(QuoteError::CorpusRead { .. })));
    }
}

// =============================================================================
// Binary Tests
// =============================================================================

mod binary_tests {
    use super::*;

    #[test]
    fn test_today_is_the_same_on_repeated_runs() {
        let home = tempdir().expect("Failed to create temp dir");
        let corpus = write_corpus(home.path(), CORPUS);

        let first = dailyquote(&home, &corpus)
            .args(["today", "--format", "json"])
            .output()
            .expect("Failed to run");
        assert!(first.status.success());

        let second = dailyquote(&home, &corpus)
            .args(["today", "--format", "json"])
            .output()
            .expect("Failed to run");
        assert!(second.status.success());

        let a: serde_json::Value = serde_json::from_slice(&first.stdout).expect("Invalid JSON");
        let b: serde_json::Value = serde_json::from_slice(&second.stdout).expect("Invalid JSON");
        assert_eq!(a["content"], b["content"]);
        assert!(home.path().join("quote_data.json").exists());
        assert!(home.path().join("quotes.json").exists());
    }

    #[test]
    fn test_today_text_output() {
        let home = tempdir().expect("Failed to create temp dir");
        let corpus = write_corpus(home.path(), CORPUS);

        dailyquote(&home, &corpus)
            .arg("today")
            .assert()
            .success()
            .stdout(predicate::str::contains("DAILY QUOTE"))
            .stdout(predicate::str::contains(DEFAULT_ORIGIN));
    }

    #[test]
    fn test_random_does_not_write_daily_state() {
        let home = tempdir().expect("Failed to create temp dir");
        let corpus = write_corpus(home.path(), CORPUS);

        dailyquote(&home, &corpus)
            .arg("random")
            .assert()
            .success()
            .stdout(predicate::str::contains("RANDOM QUOTE"));

        assert!(!home.path().join("quote_data.json").exists());
    }

    #[test]
    fn test_empty_corpus_fails_explicitly() {
        let home = tempdir().expect("Failed to create temp dir");
        let corpus = write_corpus(home.path(), "nothing quotable here\n");

        dailyquote(&home, &corpus)
            .arg("random")
            .assert()
            .failure()
            .stderr(predicate::str::contains("No quotes"));
    }

    #[test]
    fn test_missing_corpus_fails() {
        let home = tempdir().expect("Failed to create temp dir");

        dailyquote(&home, &home.path().join("absent.txt"))
            .arg("today")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to read quote corpus"));
    }

    #[test]
    fn test_sync_strict_fails_only_on_drift() {
        let home = tempdir().expect("Failed to create temp dir");
        let corpus = write_corpus(home.path(), CORPUS);

        // First run: empty snapshot vs 5 parsed quotes
        dailyquote(&home, &corpus)
            .args(["sync", "--strict"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("5 quotes parsed, 0 in snapshot"));

        // The snapshot was rewritten anyway, so the next run is clean
        dailyquote(&home, &corpus)
            .args(["sync", "--strict"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Snapshot is up to date"));
    }

    #[test]
    fn test_changed_corpus_warns_once() {
        let home = tempdir().expect("Failed to create temp dir");
        let corpus = write_corpus(home.path(), CORPUS);

        let output = dailyquote(&home, &corpus)
            .arg("today")
            .output()
            .expect("Failed to run");
        assert!(output.status.success());

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert_eq!(stderr.matches("Quote corpus changed").count(), 1, "stderr: {stderr}");
    }

    #[test]
    fn test_list_filters_by_year() {
        let home = tempdir().expect("Failed to create temp dir");
        let corpus = write_corpus(home.path(), CORPUS);

        let output = dailyquote(&home, &corpus)
            .args(["list", "--year", "2023", "--format", "json"])
            .output()
            .expect("Failed to run");
        assert!(output.status.success());

        let quotes: Vec<serde_json::Value> =
            serde_json::from_slice(&output.stdout).expect("Invalid JSON");
        assert_eq!(quotes.len(), 2);
        assert!(quotes.iter().all(|q| q["date"][0] == 2023));
    }

    #[test]
    fn test_config_set_and_get() {
        let home = tempdir().expect("Failed to create temp dir");
        let corpus = write_corpus(home.path(), CORPUS);

        dailyquote(&home, &corpus)
            .args(["config", "set", "origin", "Somebody"])
            .assert()
            .success();

        dailyquote(&home, &corpus)
            .args(["config", "get", "origin"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Somebody"));

        assert!(home.path().join("config.yaml").exists());

        dailyquote(&home, &corpus)
            .arg("today")
            .assert()
            .success()
            .stdout(predicate::str::contains("Somebody"));
    }

    #[test]
    fn test_config_rejects_unknown_key() {
        let home = tempdir().expect("Failed to create temp dir");
        let corpus = write_corpus(home.path(), CORPUS);

        dailyquote(&home, &corpus)
            .args(["config", "set", "bogus", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn test_status_runs_without_state() {
        let home = tempdir().expect("Failed to create temp dir");
        let corpus = write_corpus(home.path(), CORPUS);

        dailyquote(&home, &corpus)
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("No quote picked yet"))
            .stdout(predicate::str::contains("not running"));
    }
}
