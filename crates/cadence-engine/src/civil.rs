//! Civil time arithmetic on top of `chrono-tz`.
//!
//! Everything the occurrence engine knows about calendars goes through this
//! module: parsing civil dates and times, resolving a wall-clock time in a zone
//! to an instant, and stepping by whole days or weeks in zone-local time.
//!
//! Stepping keeps the wall-clock time, not the elapsed seconds, so a weekly
//! 11:30 meeting stays at 11:30 across a DST transition. When the target wall
//! time is ambiguous (fall back) the earliest instant wins; when it does not
//! exist (spring forward) the time is shifted forward by the length of the gap.

use crate::error::{CalendarError, Result};
use crate::weekday::Weekday;
use chrono::{
    DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone,
    Timelike,
};
use chrono_tz::Tz;

pub const SECONDS_PER_DAY: i64 = 86_400;

/// How far before a nonexistent local time to look for the offset in effect
/// before the gap. Larger than any real-world DST gap.
const GAP_PROBE_HOURS: i64 = 3;

/// A zone-local calendar offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarSpan {
    Days(i64),
    Weeks(i64),
}

impl CalendarSpan {
    pub fn days(self) -> i64 {
        match self {
            CalendarSpan::Days(days) => days,
            CalendarSpan::Weeks(weeks) => weeks * 7,
        }
    }
}

/// Wall-clock fields of an instant in its own zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub weekday: Weekday,
}

/// Parse an IANA zone identifier (e.g. "America/New_York").
pub fn parse_zone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| CalendarError::InvalidTimezone(name.to_string()))
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| CalendarError::InvalidDate(s.to_string()))
}

/// Parse an `HH:MM` time. `HH:MM:SS` is accepted as well.
pub fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| CalendarError::InvalidTime(s.to_string()))
}

/// Resolve a wall-clock time in `tz` to an instant.
pub fn resolve_local(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return dt;
    }

    // Nonexistent local time: read it with the offset in effect before the gap.
    let probe = naive - TimeDelta::hours(GAP_PROBE_HOURS);
    match tz.offset_from_local_datetime(&probe).earliest() {
        Some(offset) => {
            let utc_offset = i64::from(offset.fix().local_minus_utc());
            tz.from_utc_datetime(&(naive - TimeDelta::seconds(utc_offset)))
        }
        None => tz.from_utc_datetime(&naive),
    }
}

/// Combine a civil date and time in `tz` into an instant.
pub fn to_datetime(date: NaiveDate, time: NaiveTime, tz: Tz) -> DateTime<Tz> {
    resolve_local(tz, date.and_time(time))
}

/// Parse `date` + `time` + `zone` strings into an instant.
pub fn parse_datetime(date: &str, time: &str, zone: &str) -> Result<DateTime<Tz>> {
    let tz = parse_zone(zone)?;
    Ok(to_datetime(parse_date(date)?, parse_time(time)?, tz))
}

/// Convert a unix timestamp (seconds) to an instant in `tz`.
pub fn from_unix(timestamp: i64, tz: Tz) -> Result<DateTime<Tz>> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|utc| utc.with_timezone(&tz))
        .ok_or(CalendarError::InvalidTimestamp(timestamp))
}

/// Add a calendar span in the instant's own zone, keeping the wall-clock time.
pub fn add_span(instant: &DateTime<Tz>, span: CalendarSpan) -> DateTime<Tz> {
    let naive = instant.naive_local() + TimeDelta::days(span.days());
    resolve_local(instant.timezone(), naive)
}

pub fn civil_fields(instant: &DateTime<Tz>) -> CivilFields {
    CivilFields {
        year: instant.year(),
        month: instant.month(),
        day: instant.day(),
        hour: instant.hour(),
        minute: instant.minute(),
        weekday: instant.weekday().into(),
    }
}

/// Local midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate, tz: Tz) -> DateTime<Tz> {
    to_datetime(date, NaiveTime::MIN, tz)
}

/// 23:59 on `date`, the cutoff used for date-only searches.
pub fn end_of_day(date: NaiveDate, tz: Tz) -> DateTime<Tz> {
    let last_minute = NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN);
    to_datetime(date, last_minute, tz)
}
