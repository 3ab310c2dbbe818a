//! A collection of events kept in start-time order.

use crate::civil;
use crate::error::Result;
use crate::event::Event;
use crate::overlap::{self, Conflict};
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Calendar<I = serde_json::Value> {
    events: Vec<Event<I>>,
}

impl Calendar {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Create an event from date, time and zone and insert it.
    pub fn insert_at(&mut self, date: &str, time: &str, zone: &str) -> Result<&mut Event> {
        let event = Event::new(date, time, zone)?;
        Ok(self.insert(event))
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> Calendar<I> {
    /// Build from any events; they are sorted by start (stable).
    pub fn from_events(mut events: Vec<Event<I>>) -> Self {
        events.sort_by_key(Event::timestamp);
        Self { events }
    }

    pub fn events(&self) -> &[Event<I>] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Insert after every event starting at or before it, and return the
    /// stored event for further edits.
    pub fn insert(&mut self, event: Event<I>) -> &mut Event<I> {
        let timestamp = event.timestamp();
        let position = self
            .events
            .partition_point(|existing| existing.timestamp() <= timestamp);
        debug!(event_id = %event.event_id(), position, "inserting event");
        self.events.insert(position, event);
        &mut self.events[position]
    }

    /// Every overlapping pair of stored events (first-occurrence instants).
    pub fn conflicts(&self) -> Vec<Conflict<'_, I>> {
        let mut conflicts = Vec::new();
        for (i, a) in self.events.iter().enumerate() {
            for b in &self.events[i + 1..] {
                if a.overlaps(b) {
                    conflicts.push(Conflict {
                        event_a: a,
                        event_b: b,
                        overlap_minutes: overlap::overlap_minutes(a, b),
                    });
                }
            }
        }
        conflicts
    }
}

impl<I: Clone> Calendar<I> {
    /// Occurrences of every event before `date`, merged in start order.
    pub fn all_before(&self, date: &str) -> Result<Vec<Event<I>>> {
        Ok(self.all_before_date(civil::parse_date(date)?))
    }

    pub fn all_before_date(&self, date: NaiveDate) -> Vec<Event<I>> {
        let mut occurrences: Vec<Event<I>> = self
            .events
            .iter()
            .flat_map(|event| event.all_before_date(date))
            .collect();
        occurrences.sort_by_key(Event::timestamp);
        occurrences
    }

    /// The earliest occurrence of any event strictly after `cutoff`.
    pub fn next_after(&mut self, cutoff: &DateTime<Tz>) -> Option<Event<I>> {
        self.events
            .iter_mut()
            .filter_map(|event| event.next_after(cutoff))
            .min_by_key(Event::timestamp)
    }
}
