//! # cadence-engine
//!
//! Recurring calendar events with weekday rules, week strides, excluded
//! occurrences and DST-aware stepping.
//!
//! The engine answers three questions about an [`Event`]: what are its next N
//! occurrences ([`Event::next`]), what is its first occurrence after some
//! instant ([`Event::next_after`]), and does it overlap another event
//! ([`Event::overlaps`]). All calendar arithmetic happens in the event's own
//! IANA zone via `chrono-tz`.
//!
//! ```rust
//! use cadence_engine::{Event, Recurrence, Weekday};
//!
//! let mut event = Event::new("2025-02-24", "11:30", "America/New_York")
//!     .unwrap()
//!     .every(Recurrence::on([Weekday::Monday, Weekday::Thursday]));
//!
//! let days: Vec<u32> = event.next(4).iter().map(|e| e.day()).collect();
//! assert_eq!(days, vec![24, 27, 3, 6]);
//! ```
//!
//! ## Modules
//!
//! - [`civil`]: zone-local date/time parsing and day/week stepping
//! - [`weekday`]: Sunday-first weekday enumeration
//! - [`recurrence`]: recurrence rules and the step to the next occurrence
//! - [`duration`]: event durations
//! - [`event`]: the event value and its builders
//! - [`engine`]: `next` and `next_after`
//! - [`range`]: `all_before`
//! - [`overlap`]: overlap predicate and conflict listing
//! - [`calendar`]: start-ordered event collection
//! - [`codec`]: persisted JSON form
//! - [`error`]: error types

pub mod calendar;
pub mod civil;
pub mod codec;
pub mod duration;
pub mod engine;
pub mod error;
pub mod event;
pub mod overlap;
pub mod range;
pub mod recurrence;
pub mod weekday;

pub use calendar::Calendar;
pub use codec::EventRecord;
pub use duration::EventDuration;
pub use error::CalendarError;
pub use event::{Event, EventId};
pub use overlap::{find_conflicts, intervals_overlap, Conflict};
pub use recurrence::Recurrence;
pub use weekday::Weekday;
