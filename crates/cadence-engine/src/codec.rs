//! Persisted JSON form of an event.
//!
//! ```json
//! {
//!   "date": "2025-02-03", "time": "11:30", "tz": "America/New_York",
//!   "event_id": "…",
//!   "recurs": { "weekdays": ["Monday", "Wednesday", "Friday"] },
//!   "exclude": [1738773000],
//!   "duration": { "minutes": 90 },
//!   "info": { "title": "standup" }
//! }
//! ```
//!
//! `exclude` and `recurs.weekdays` are sets: they are written sorted and
//! without duplicates, so they round-trip by set equality rather than
//! element order.
//!
//! `recurs` is `null` for one-off events. `event_id` and `exclude` may be
//! omitted on input; `duration` and `info` are omitted on output when absent.

use crate::civil;
use crate::duration::EventDuration;
use crate::error::{CalendarError, Result};
use crate::event::{Event, EventId};
use crate::recurrence::Recurrence;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serde-facing mirror of [`Event`].
///
/// The start is stored as zone-local date and `HH:MM`, so seconds are dropped
/// on encode. A start in the second pass of a repeated (fall-back) hour
/// decodes to the first pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord<I = serde_json::Value> {
    pub date: String,
    pub time: String,
    pub tz: String,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub recurs: Option<Recurrence>,
    #[serde(default)]
    pub exclude: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<EventDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<I>,
}

impl<I: Clone> From<&Event<I>> for EventRecord<I> {
    fn from(event: &Event<I>) -> Self {
        EventRecord {
            date: event.datetime().format("%Y-%m-%d").to_string(),
            time: event.datetime().format("%H:%M").to_string(),
            tz: event.timezone_name().to_string(),
            event_id: Some(event.event_id().to_string()),
            recurs: event.recurrence().cloned(),
            exclude: event.exclusions().iter().copied().collect(),
            duration: event.duration(),
            info: event.info().cloned(),
        }
    }
}

impl<I> TryFrom<EventRecord<I>> for Event<I> {
    type Error = CalendarError;

    fn try_from(record: EventRecord<I>) -> Result<Self> {
        let start = civil::parse_datetime(&record.date, &record.time, &record.tz)?;
        let event_id = record
            .event_id
            .filter(|id| !id.is_empty())
            .map_or_else(EventId::generate, EventId::from);

        let mut event = Event::with_id(start, event_id);
        event.recurrence = record.recurs;
        event.duration = record.duration;
        event.exclusions = record.exclude.into_iter().collect();
        event.info = record.info;
        Ok(event)
    }
}

impl<I: Serialize + Clone> Serialize for Event<I> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        EventRecord::from(self).serialize(serializer)
    }
}

impl<'de, I: Deserialize<'de>> Deserialize<'de> for Event<I> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let record = EventRecord::<I>::deserialize(deserializer)?;
        Event::try_from(record).map_err(serde::de::Error::custom)
    }
}

impl<I: Serialize + Clone> Event<I> {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<I: DeserializeOwned> Event<I> {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
