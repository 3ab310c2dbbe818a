//! Recurrence rules: how an event repeats, and how far away the next
//! occurrence is.
//!
//! A rule is a week stride (every N weeks) plus an optional set of weekdays.
//! Without weekdays the event repeats every N weeks on its own weekday. With
//! weekdays it visits each listed day of an active week, then jumps N weeks
//! ahead to the first listed day of the next active week.

use crate::civil::CalendarSpan;
use crate::error::{CalendarError, Result};
use crate::weekday::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::num::NonZeroU32;

/// Recurrence settings of an event.
///
/// `weekday` is kept apart from `weekdays` so that persisted rules
/// round-trip exactly; for stepping both are merged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Recurrence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weeks: Option<NonZeroU32>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    weekdays: BTreeSet<Weekday>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    weekday: Option<Weekday>,
}

impl Recurrence {
    /// Every week on the event's own weekday.
    pub fn weekly() -> Self {
        Self {
            weeks: Some(NonZeroU32::MIN),
            ..Self::default()
        }
    }

    /// Every `weeks` weeks. Zero is rejected.
    pub fn every_weeks(weeks: u32) -> Result<Self> {
        let stride = NonZeroU32::new(weeks).ok_or_else(|| {
            CalendarError::InvalidRecurrence("week stride must be at least 1".to_string())
        })?;
        Ok(Self {
            weeks: Some(stride),
            ..Self::default()
        })
    }

    /// Every week on the given days.
    pub fn on<D>(days: D) -> Self
    where
        D: IntoIterator<Item = Weekday>,
    {
        Self::default().with_weekdays(days)
    }

    pub fn with_weekdays<D>(mut self, days: D) -> Self
    where
        D: IntoIterator<Item = Weekday>,
    {
        self.weekdays.extend(days);
        self
    }

    /// Set the single-day field (`weekday` on the wire).
    pub fn with_weekday(mut self, day: Weekday) -> Self {
        self.weekday = Some(day);
        self
    }

    /// Weeks between active weeks; 1 when unset.
    pub fn stride(&self) -> u32 {
        self.weeks.map_or(1, NonZeroU32::get)
    }

    /// The stride exactly as configured.
    pub fn weeks(&self) -> Option<u32> {
        self.weeks.map(NonZeroU32::get)
    }

    pub fn weekdays(&self) -> &BTreeSet<Weekday> {
        &self.weekdays
    }

    pub fn weekday(&self) -> Option<Weekday> {
        self.weekday
    }

    /// All days the rule repeats on, `weekday` included.
    pub fn day_set(&self) -> BTreeSet<Weekday> {
        let mut days = self.weekdays.clone();
        days.extend(self.weekday);
        days
    }

    /// Calendar offset from an occurrence on `current` to the next one.
    ///
    /// Always at least one day: a later listed day of the same week, or a
    /// jump of `stride` weeks corrected back to the earliest listed day.
    pub fn step_from(&self, current: Weekday) -> CalendarSpan {
        let stride = i64::from(self.stride());
        let days = self.day_set();

        let Some(first) = days.first().map(|day| day.index()) else {
            return CalendarSpan::Weeks(stride);
        };

        let current = current.index();
        match days.iter().map(|day| day.index()).find(|&day| day > current) {
            Some(later) => CalendarSpan::Days(later - current),
            None => CalendarSpan::Days(stride * 7 - (current - first)),
        }
    }

    /// Render as an RFC 5545 RRULE value.
    ///
    /// Weeks start on Sunday (`WKST=SU`), the same week the stepping uses.
    pub fn to_rrule(&self) -> String {
        let mut rule = format!("FREQ=WEEKLY;INTERVAL={}", self.stride());
        let days = self.day_set();
        if !days.is_empty() {
            let codes: Vec<&str> = days.iter().map(|day| day.rrule_code()).collect();
            rule.push_str(";BYDAY=");
            rule.push_str(&codes.join(","));
        }
        rule.push_str(";WKST=SU");
        rule
    }
}
