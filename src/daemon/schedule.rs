//! When the daemon delivers the next quote.

use anyhow::{bail, Result};
use chrono::{Duration, NaiveDateTime, NaiveTime};

use daily_quote::config::{Config, ScheduleMode, MAX_INTERVAL_HOURS};

/// Delivery cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Every day at the given local time.
    DailyAt(NaiveTime),
    /// At a fixed interval from the previous delivery.
    Every(Duration),
}

impl Schedule {
    pub fn from_config(config: &Config) -> Result<Self> {
        let schedule = match config.schedule_mode {
            ScheduleMode::Daily => Schedule::DailyAt(config.notification_time()?),
            ScheduleMode::Interval => {
                let hours = config.interval_hours;
                if !(1..=MAX_INTERVAL_HOURS).contains(&hours) {
                    bail!("interval_hours must be between 1 and {MAX_INTERVAL_HOURS}, got {hours}");
                }
                let interval = i64::try_from(hours)
                    .ok()
                    .and_then(Duration::try_hours)
                    .ok_or_else(|| anyhow::anyhow!("interval_hours {hours} is too large"))?;
                Schedule::Every(interval)
            }
        };
        Ok(schedule)
    }

    /// The first trigger strictly after `now`, or `None` past the end of
    /// the calendar.
    pub fn next_fire(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match *self {
            Schedule::DailyAt(time) => {
                let today = now.date().and_time(time);
                if today > now {
                    Some(today)
                } else {
                    today.checked_add_signed(Duration::days(1))
                }
            }
            Schedule::Every(interval) => now.checked_add_signed(interval),
        }
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Schedule::DailyAt(time) => write!(f, "daily at {}", time.format("%H:%M")),
            Schedule::Every(interval) => write!(f, "every {}h", interval.num_hours()),
        }
    }
}
