//! How long an event lasts.

use crate::error::{CalendarError, Result};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// The span of an event, stored as total minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "DurationRecord", into = "DurationRecord")]
pub struct EventDuration {
    minutes: u32,
}

impl EventDuration {
    /// Build from hours and/or minutes. At least one must be given, and the
    /// total must fit in `u32` minutes.
    pub fn new(hours: Option<u32>, minutes: Option<u32>) -> Result<Self> {
        if hours.is_none() && minutes.is_none() {
            return Err(CalendarError::EmptyDuration);
        }
        let hours = hours.unwrap_or(0);
        let minutes = minutes.unwrap_or(0);
        let total = hours
            .checked_mul(60)
            .and_then(|m| m.checked_add(minutes))
            .ok_or_else(|| {
                CalendarError::InvalidDuration(format!("{hours}h{minutes}m overflows"))
            })?;
        Ok(Self { minutes: total })
    }

    /// Saturates at `u32::MAX` minutes.
    pub fn from_hours(hours: u32) -> Self {
        Self {
            minutes: hours.saturating_mul(60),
        }
    }

    pub fn from_minutes(minutes: u32) -> Self {
        Self { minutes }
    }

    /// Length in hours, minutes included as a fraction (90 min → 1.5).
    pub fn hours(&self) -> f64 {
        f64::from(self.minutes) / 60.0
    }

    /// Length in minutes, hours included (1h30 → 90).
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn as_time_delta(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.minutes))
    }
}

/// Persisted form: `{ "hours"?: n, "minutes"?: n }`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct DurationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hours: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    minutes: Option<u32>,
}

impl TryFrom<DurationRecord> for EventDuration {
    type Error = CalendarError;

    fn try_from(record: DurationRecord) -> Result<Self> {
        EventDuration::new(record.hours, record.minutes)
    }
}

impl From<EventDuration> for DurationRecord {
    fn from(duration: EventDuration) -> Self {
        DurationRecord {
            hours: None,
            minutes: Some(duration.minutes),
        }
    }
}
