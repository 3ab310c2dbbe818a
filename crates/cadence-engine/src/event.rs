//! Events: a start instant in a zone, with optional recurrence, duration,
//! excluded occurrences and a caller payload.
//!
//! Builder methods (`every`, `except`, `lasting`, `with_info`) consume the
//! event and return the updated value. Events already stored in a
//! [`Calendar`](crate::calendar::Calendar) are edited in place through
//! `set_recurrence`, `add_exclusion` and `set_duration`.

use crate::civil::{self, CivilFields};
use crate::duration::EventDuration;
use crate::error::Result;
use crate::recurrence::Recurrence;
use crate::weekday::Weekday;
use chrono::{DateTime, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifier shared by every occurrence of the same event.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EventId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A possibly recurring calendar event.
///
/// The payload type `I` defaults to an arbitrary JSON value.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<I = serde_json::Value> {
    pub(crate) start: DateTime<Tz>,
    pub(crate) recurrence: Option<Recurrence>,
    pub(crate) duration: Option<EventDuration>,
    pub(crate) exclusions: BTreeSet<i64>,
    pub(crate) event_id: EventId,
    pub(crate) info: Option<I>,
}

impl Event {
    /// Create an event from a civil date (`YYYY-MM-DD`), time (`HH:MM`) and
    /// IANA zone, e.g. `Event::new("2025-02-25", "11:30", "America/New_York")`.
    pub fn new(date: &str, time: &str, zone: &str) -> Result<Self> {
        Ok(Self::at(civil::parse_datetime(date, time, zone)?))
    }

    /// Create an event from a unix timestamp, viewed in `zone`.
    pub fn from_timestamp(timestamp: i64, zone: &str) -> Result<Self> {
        let tz = civil::parse_zone(zone)?;
        Ok(Self::at(civil::from_unix(timestamp, tz)?))
    }

    pub fn at(start: DateTime<Tz>) -> Self {
        Self::with_id(start, EventId::generate())
    }
}

impl<I> Event<I> {
    pub(crate) fn with_id(start: DateTime<Tz>, event_id: EventId) -> Self {
        Self {
            start,
            recurrence: None,
            duration: None,
            exclusions: BTreeSet::new(),
            event_id,
            info: None,
        }
    }

    pub fn every(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    /// Skip the occurrence starting at `timestamp`.
    pub fn except(mut self, timestamp: i64) -> Self {
        self.exclusions.insert(timestamp);
        self
    }

    /// Skip the occurrence on `date` (`YYYY-MM-DD`) at this event's
    /// wall-clock time.
    pub fn except_on(self, date: &str) -> Result<Self> {
        let date = civil::parse_date(date)?;
        let timestamp = civil::to_datetime(date, self.start.time(), self.timezone()).timestamp();
        Ok(self.except(timestamp))
    }

    pub fn lasting(mut self, duration: EventDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Attach a payload, replacing any existing one.
    pub fn with_info<J>(self, info: J) -> Event<J> {
        Event {
            start: self.start,
            recurrence: self.recurrence,
            duration: self.duration,
            exclusions: self.exclusions,
            event_id: self.event_id,
            info: Some(info),
        }
    }

    pub fn set_recurrence(&mut self, recurrence: Option<Recurrence>) -> &mut Self {
        self.recurrence = recurrence;
        self
    }

    pub fn add_exclusion(&mut self, timestamp: i64) -> &mut Self {
        self.exclusions.insert(timestamp);
        self
    }

    pub fn set_duration(&mut self, duration: Option<EventDuration>) -> &mut Self {
        self.duration = duration;
        self
    }

    pub fn timestamp(&self) -> i64 {
        self.start.timestamp()
    }

    pub fn datetime(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn timezone(&self) -> Tz {
        self.start.timezone()
    }

    pub fn timezone_name(&self) -> &'static str {
        self.timezone().name()
    }

    pub fn civil(&self) -> CivilFields {
        civil::civil_fields(&self.start)
    }

    pub fn year(&self) -> i32 {
        self.civil().year
    }

    /// Month from 1 to 12.
    pub fn month(&self) -> u32 {
        self.civil().month
    }

    pub fn day(&self) -> u32 {
        self.civil().day
    }

    pub fn hour(&self) -> u32 {
        self.civil().hour
    }

    pub fn minute(&self) -> u32 {
        self.civil().minute
    }

    pub fn time(&self) -> NaiveTime {
        self.start.time()
    }

    /// Weekday in the event's own zone.
    pub fn weekday(&self) -> Weekday {
        self.civil().weekday
    }

    pub fn recurrence(&self) -> Option<&Recurrence> {
        self.recurrence.as_ref()
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    pub fn duration(&self) -> Option<EventDuration> {
        self.duration
    }

    /// End instant; equal to the start when there is no duration.
    pub fn end(&self) -> DateTime<Tz> {
        match self.duration {
            Some(duration) => self.start + duration.as_time_delta(),
            None => self.start,
        }
    }

    /// Exclusions not yet passed by `next` / `next_after`.
    pub fn exclusions(&self) -> &BTreeSet<i64> {
        &self.exclusions
    }

    pub fn event_id(&self) -> &EventId {
        &self.event_id
    }

    pub fn info(&self) -> Option<&I> {
        self.info.as_ref()
    }
}

impl<I: Clone> Event<I> {
    /// The same event at the same instant, seen from another zone.
    ///
    /// Weekday and day stepping of the returned value follow the new zone.
    pub fn in_zone(&self, zone: &str) -> Result<Self> {
        let tz = civil::parse_zone(zone)?;
        Ok(self.occurrence_at(self.start.with_timezone(&tz)))
    }

    /// A copy of this event starting at `start`.
    pub(crate) fn occurrence_at(&self, start: DateTime<Tz>) -> Self {
        Self {
            start,
            ..self.clone()
        }
    }
}

impl<I> fmt::Display for Event<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.start.format("%Y-%m-%d %H:%M"),
            self.timezone_name()
        )
    }
}
