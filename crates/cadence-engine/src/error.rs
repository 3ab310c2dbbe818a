//! Error types for cadence-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("Invalid recurrence: {0}")]
    InvalidRecurrence(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// A duration was built with neither hours nor minutes.
    #[error("empty duration")]
    EmptyDuration,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CalendarError>;
