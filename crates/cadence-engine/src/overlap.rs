//! Detect overlapping events.
//!
//! An event without a duration is a single instant; one with a duration
//! occupies `[start, start + duration)`. Adjacent events (one ends exactly
//! when the other starts) do NOT overlap.

use crate::event::Event;

/// A detected overlap between two events.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict<'a, A, B = A> {
    pub event_a: &'a Event<A>,
    pub event_b: &'a Event<B>,
    pub overlap_minutes: i64,
}

/// Whether two (start timestamp, duration in minutes) pairs overlap.
///
/// Two instants overlap only when equal. Otherwise a missing duration counts
/// as zero and an interval overlaps the other when it starts no later than the
/// other and ends after the other starts, in either direction. This lets an
/// instant sitting at the very start of an interval count as overlapping.
pub fn intervals_overlap(
    start_a: i64,
    minutes_a: Option<u32>,
    start_b: i64,
    minutes_b: Option<u32>,
) -> bool {
    if minutes_a.is_none() && minutes_b.is_none() {
        return start_a == start_b;
    }

    let end_a = start_a + i64::from(minutes_a.unwrap_or(0)) * 60;
    let end_b = start_b + i64::from(minutes_b.unwrap_or(0)) * 60;

    (end_a > start_b && start_a <= start_b) || (end_b > start_a && start_b <= start_a)
}

impl<I> Event<I> {
    /// Whether this occurrence overlaps `other`. Zones do not matter.
    pub fn overlaps<J>(&self, other: &Event<J>) -> bool {
        intervals_overlap(
            self.timestamp(),
            self.duration().map(|d| d.minutes()),
            other.timestamp(),
            other.duration().map(|d| d.minutes()),
        )
    }
}

/// Find every overlapping pair between two event lists.
///
/// `overlap_minutes` is `min(end) - max(start)`; it is zero when an instant
/// overlaps.
pub fn find_conflicts<'a, A, B>(
    events_a: &'a [Event<A>],
    events_b: &'a [Event<B>],
) -> Vec<Conflict<'a, A, B>> {
    let mut conflicts = Vec::new();

    for a in events_a {
        for b in events_b {
            if a.overlaps(b) {
                conflicts.push(Conflict {
                    event_a: a,
                    event_b: b,
                    overlap_minutes: overlap_minutes(a, b),
                });
            }
        }
    }

    conflicts
}

pub(crate) fn overlap_minutes<A, B>(a: &Event<A>, b: &Event<B>) -> i64 {
    let overlap_start = a.timestamp().max(b.timestamp());
    let overlap_end = a.end().timestamp().min(b.end().timestamp());
    (overlap_end - overlap_start).max(0) / 60
}
