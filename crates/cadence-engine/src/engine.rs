//! Occurrence generation: bounded sequences and forward-jump search.
//!
//! Both operations take `&mut self` because they drop exclusions that the
//! search has moved past. Clone the event first for a replayable view.

use crate::civil::{self, SECONDS_PER_DAY};
use crate::error::Result;
use crate::event::Event;
use crate::recurrence::Recurrence;
use chrono::{DateTime, Datelike};
use chrono_tz::Tz;
use tracing::{debug, trace};

/// One raw step of the rule from `from`, exclusions ignored.
pub(crate) fn step(rule: &Recurrence, from: &DateTime<Tz>) -> DateTime<Tz> {
    let span = rule.step_from(from.weekday().into());
    civil::add_span(from, span)
}

impl<I: Clone> Event<I> {
    /// The current occurrence followed by up to `count - 1` more.
    ///
    /// A one-off event always yields just itself (for `count >= 1`).
    /// Excluded occurrences are skipped, the current one included: an event
    /// whose own start is excluded begins with its next occurrence.
    /// Exclusions at or before the last emitted occurrence are removed from
    /// this event.
    pub fn next(&mut self, count: usize) -> Vec<Self> {
        if count == 0 {
            return Vec::new();
        }
        let Some(rule) = self.recurrence.clone() else {
            return vec![self.clone()];
        };

        let mut cursor = self.start;
        if self.exclusions.contains(&cursor.timestamp()) {
            cursor = self.advance(&rule, &cursor);
        }

        let mut out = Vec::with_capacity(count);
        loop {
            self.prune_exclusions(cursor.timestamp());
            out.push(self.occurrence_at(cursor));
            if out.len() == count {
                break;
            }
            cursor = self.advance(&rule, &cursor);
        }
        out
    }

    /// First occurrence strictly after `cutoff`, or `None` for a one-off event
    /// that does not start after it.
    ///
    /// Jumps straight to the active week nearest the cutoff instead of
    /// enumerating every occurrence in between. Exclusions are not consulted,
    /// but those at or before the cutoff are dropped from this event.
    pub fn next_after(&mut self, cutoff: &DateTime<Tz>) -> Option<Self> {
        let cutoff = cutoff.timestamp();
        self.prune_exclusions(cutoff);

        let origin = self.timestamp();
        let Some(rule) = self.recurrence.as_ref() else {
            return (origin > cutoff).then(|| self.clone());
        };
        if origin > cutoff {
            return Some(self.clone());
        }

        let stride = i64::from(rule.stride());
        let days_until = (cutoff - origin).div_euclid(SECONDS_PER_DAY);
        let mut weeks_until = days_until / 7;
        weeks_until -= weeks_until % stride;

        let mut candidate = civil::add_span(&self.start, civil::CalendarSpan::Weeks(weeks_until));
        while candidate.timestamp() <= cutoff {
            candidate = step(rule, &candidate);
        }
        Some(self.occurrence_at(candidate))
    }

    /// [`next_after`](Self::next_after) with the cutoff at 23:59 of `date` in `zone`.
    pub fn next_after_date(&mut self, date: &str, zone: &str) -> Result<Option<Self>> {
        let tz = civil::parse_zone(zone)?;
        let cutoff = civil::end_of_day(civil::parse_date(date)?, tz);
        Ok(self.next_after(&cutoff))
    }

    /// [`next_after`](Self::next_after) with the cutoff at `date` `time` in `zone`.
    pub fn next_after_time(&mut self, date: &str, time: &str, zone: &str) -> Result<Option<Self>> {
        let cutoff = civil::parse_datetime(date, time, zone)?;
        Ok(self.next_after(&cutoff))
    }

    /// Step from `from` until landing on a timestamp that is not excluded.
    ///
    /// Candidates strictly increase and exclusions are finite, so this ends.
    fn advance(&self, rule: &Recurrence, from: &DateTime<Tz>) -> DateTime<Tz> {
        let mut candidate = step(rule, from);
        while self.exclusions.contains(&candidate.timestamp()) {
            trace!(
                event_id = %self.event_id,
                timestamp = candidate.timestamp(),
                "skipping excluded occurrence"
            );
            candidate = step(rule, &candidate);
        }
        candidate
    }

    /// Drop every exclusion at or before `timestamp`.
    fn prune_exclusions(&mut self, timestamp: i64) {
        let Some(next) = timestamp.checked_add(1) else {
            self.exclusions.clear();
            return;
        };
        let before = self.exclusions.len();
        self.exclusions = self.exclusions.split_off(&next);
        let dropped = before - self.exclusions.len();
        if dropped > 0 {
            debug!(event_id = %self.event_id, dropped, "pruned passed exclusions");
        }
    }
}
