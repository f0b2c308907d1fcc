//! Error types for freebusy-engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised before any busy data is fetched or merged.
///
/// Every variant describes a malformed request or interval. Missing calendar
/// data and empty results are not errors (see [`SourceError`]).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("Invalid request: at least one calendar id is required")]
    EmptyCalendarIds,

    #[error("Invalid request: minimum duration must be a positive number of minutes, got {0}")]
    NonPositiveDuration(i64),

    #[error("Invalid request: range start {start} is after range end {end}")]
    InvertedRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid interval: start {start} is after end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// A single calendar could not report its busy periods.
///
/// Returned by [`crate::source::BusyPeriodSource`] implementations. The solver
/// logs it and treats the calendar as having no busy time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    #[error("Calendar {calendar_id} unavailable: {reason}")]
    Unavailable { calendar_id: String, reason: String },
}

pub type Result<T> = std::result::Result<T, AvailabilityError>;
