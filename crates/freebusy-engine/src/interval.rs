//! Time intervals and search windows.
//!
//! All instants are absolute (`DateTime<Utc>`). Time-zone interpretation
//! happens before values reach this crate.

use crate::error::{AvailabilityError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A span of time `[start, end)` with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Build an interval, rejecting `start > end`.
    ///
    /// Zero-length intervals (`start == end`) are accepted.
    ///
    /// # Errors
    /// Returns `AvailabilityError::InvalidInterval` if `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(AvailabilityError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// True when the interval covers no time.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whole minutes between `start` and `end`, rounded down.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// True when the two intervals share at least one instant of positive length.
    ///
    /// Touching intervals (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// The bounded range within which free slots are searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub range_start: DateTime<Utc>,
    pub range_end: DateTime<Utc>,
}

impl SearchWindow {
    /// Build a window, rejecting `range_start > range_end`.
    ///
    /// # Errors
    /// Returns `AvailabilityError::InvertedRange` if the bounds are inverted.
    pub fn new(range_start: DateTime<Utc>, range_end: DateTime<Utc>) -> Result<Self> {
        if range_start > range_end {
            return Err(AvailabilityError::InvertedRange {
                start: range_start,
                end: range_end,
            });
        }
        Ok(Self {
            range_start,
            range_end,
        })
    }

    /// True when `interval` shares positive-length time with the window.
    pub fn intersects(&self, interval: &Interval) -> bool {
        interval.start < self.range_end && interval.end > self.range_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 16, hour, min, 0).unwrap()
    }

    #[test]
    fn interval_rejects_inverted_bounds() {
        let err = Interval::new(at(11, 0), at(10, 0)).unwrap_err();
        assert_eq!(
            err,
            AvailabilityError::InvalidInterval {
                start: at(11, 0),
                end: at(10, 0)
            }
        );
    }

    #[test]
    fn zero_length_interval_is_legal_but_empty() {
        let iv = Interval::new(at(10, 0), at(10, 0)).unwrap();
        assert!(iv.is_empty());
        assert_eq!(iv.duration_minutes(), 0);
    }

    #[test]
    fn duration_rounds_down_to_whole_minutes() {
        let iv = Interval::new(at(10, 0), at(10, 29) + chrono::Duration::seconds(59)).unwrap();
        assert_eq!(iv.duration_minutes(), 29);
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let a = Interval::new(at(9, 0), at(10, 0)).unwrap();
        let b = Interval::new(at(10, 0), at(11, 0)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&Interval::new(at(9, 59), at(11, 0)).unwrap()));
    }

    #[test]
    fn window_rejects_inverted_range_and_accepts_empty() {
        assert!(SearchWindow::new(at(17, 0), at(9, 0)).is_err());
        assert!(SearchWindow::new(at(9, 0), at(9, 0)).is_ok());
    }
}
