//! Configuration management
//!
//! Settings live in `~/.dailyquote/config.yaml`. A missing file means
//! all defaults. `DAILYQUOTE_HOME` moves the whole data directory and
//! `DAILYQUOTE_CORPUS` overrides the corpus path.

use anyhow::{bail, Context, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::quotes::{DEFAULT_ORIGIN, MIN_MESSAGE_CHARS};

/// Corpus file looked for in the working directory by default.
pub const DEFAULT_CORPUS: &str = "Jordi's Famous Quotes.txt";

/// Longest accepted `interval_hours`, one year.
pub const MAX_INTERVAL_HOURS: u64 = 24 * 365;

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const KEYS: [&str; 7] = [
    "corpus_path",
    "origin",
    "notifications",
    "notification_time",
    "schedule_mode",
    "interval_hours",
    "max_message_chars",
];

/// How the daemon spaces out deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleMode {
    /// Once a day at `notification_time`.
    #[default]
    Daily,
    /// Every `interval_hours` hours.
    Interval,
}

impl std::fmt::Display for ScheduleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleMode::Daily => write!(f, "daily"),
            ScheduleMode::Interval => write!(f, "interval"),
        }
    }
}

impl std::str::FromStr for ScheduleMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "daily" => Ok(ScheduleMode::Daily),
            "interval" => Ok(ScheduleMode::Interval),
            other => bail!("Unknown schedule mode '{other}' (expected 'daily' or 'interval')"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Path to the quote corpus. `~/` is expanded.
    pub corpus_path: String,

    /// Attribution stamped on every parsed quote
    pub origin: String,

    /// Send desktop notifications (otherwise quotes are printed)
    pub notifications: bool,

    /// Daily delivery time, `HH:MM` in local time
    pub notification_time: String,

    pub schedule_mode: ScheduleMode,
    pub interval_hours: u64,

    /// Longest notification body before it is cut short
    pub max_message_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_path: DEFAULT_CORPUS.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            notifications: true,
            notification_time: "07:59".to_string(),
            schedule_mode: ScheduleMode::Daily,
            interval_hours: 24,
            max_message_chars: 200,
        }
    }
}

impl Config {
    /// Loads the config file and applies environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        if let Ok(corpus) = env::var("DAILYQUOTE_CORPUS") {
            config.corpus_path = corpus;
        }
        Ok(config)
    }

    /// Loads the config file at `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path:?}"))?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_saphyr::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {path:?}"))
    }

    /// Writes the config to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Writes the config to `path`, creating its directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {parent:?}"))?;
        }
        let yaml = serde_saphyr::to_string(self).context("Failed to serialize config")?;
        fs::write(path, yaml).with_context(|| format!("Failed to write config file {path:?}"))?;
        Ok(())
    }

    /// The directory holding config, snapshot, state, and daemon files.
    pub fn data_dir() -> Result<PathBuf> {
        if let Ok(home) = env::var("DAILYQUOTE_HOME") {
            return Ok(PathBuf::from(home));
        }
        let dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?
            .join(".dailyquote");
        Ok(dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("config.yaml"))
    }

    /// Where the quote snapshot is kept.
    pub fn snapshot_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("quotes.json"))
    }

    /// Where the daily pick is kept.
    pub fn state_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("quote_data.json"))
    }

    /// The corpus path with `~/` expanded.
    pub fn corpus_path(&self) -> PathBuf {
        expand_home(&self.corpus_path)
    }

    /// Parses `notification_time`.
    pub fn notification_time(&self) -> Result<NaiveTime> {
        parse_time(&self.notification_time)
    }

    /// Returns the value of `key` as a string, if the key exists.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "corpus_path" => self.corpus_path.clone(),
            "origin" => self.origin.clone(),
            "notifications" => self.notifications.to_string(),
            "notification_time" => self.notification_time.clone(),
            "schedule_mode" => self.schedule_mode.to_string(),
            "interval_hours" => self.interval_hours.to_string(),
            "max_message_chars" => self.max_message_chars.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Sets `key` from a string, validating the value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "corpus_path" => self.corpus_path = value.to_string(),
            "origin" => {
                if value.trim().is_empty() {
                    bail!("origin cannot be empty");
                }
                self.origin = value.to_string();
            }
            "notifications" => {
                self.notifications = value
                    .parse()
                    .with_context(|| format!("Invalid boolean '{value}' for notifications"))?;
            }
            "notification_time" => {
                parse_time(value)?;
                self.notification_time = value.to_string();
            }
            "schedule_mode" => self.schedule_mode = value.parse()?,
            "interval_hours" => {
                let hours: u64 = value
                    .parse()
                    .with_context(|| format!("Invalid number '{value}' for interval_hours"))?;
                if !(1..=MAX_INTERVAL_HOURS).contains(&hours) {
                    bail!("interval_hours must be between 1 and {MAX_INTERVAL_HOURS}");
                }
                self.interval_hours = hours;
            }
            "max_message_chars" => {
                let chars: usize = value
                    .parse()
                    .with_context(|| format!("Invalid number '{value}' for max_message_chars"))?;
                if chars < MIN_MESSAGE_CHARS {
                    bail!("max_message_chars must be at least {MIN_MESSAGE_CHARS}");
                }
                self.max_message_chars = chars;
            }
            other => bail!("Unknown config key '{other}'. Valid keys: {}", KEYS.join(", ")),
        }
        Ok(())
    }
}

fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .with_context(|| format!("Invalid time '{value}' (expected HH:MM)"))
}

/// Expands a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
