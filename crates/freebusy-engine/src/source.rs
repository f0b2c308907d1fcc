//! Busy-period sources: where raw per-calendar busy data comes from.
//!
//! Fetching busy data (network calls, auth, retries) lives outside this crate.
//! The solver only sees the [`BusyPeriodSource`] trait, queried once per
//! calendar id.

use crate::error::SourceError;
use crate::interval::{Interval, SearchWindow};
use std::collections::HashMap;

/// Supplies the raw busy intervals of one calendar for a search window.
///
/// Implementations may return intervals that extend past the window, in any
/// order, overlapping each other. An `Err` marks the calendar as unavailable;
/// the solver treats it as having no busy time.
pub trait BusyPeriodSource {
    fn busy_periods(
        &self,
        calendar_id: &str,
        window: &SearchWindow,
    ) -> Result<Vec<Interval>, SourceError>;
}

/// In-memory busy-period source.
///
/// Holds already-fetched busy intervals per calendar and, optionally, a failure
/// reason per calendar. Queries return only intervals that intersect the window,
/// unclipped, the way a free/busy API reports them.
#[derive(Debug, Clone, Default)]
pub struct StaticBusySource {
    calendars: HashMap<String, Vec<Interval>>,
    failures: HashMap<String, String>,
}

impl StaticBusySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register busy intervals for `calendar_id`, appending to any already present.
    pub fn with_calendar(
        mut self,
        calendar_id: impl Into<String>,
        busy: impl IntoIterator<Item = Interval>,
    ) -> Self {
        self.insert_calendar(calendar_id, busy);
        self
    }

    /// Mark `calendar_id` as failing with `reason`.
    pub fn with_failure(
        mut self,
        calendar_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        self.insert_failure(calendar_id, reason);
        self
    }

    pub fn insert_calendar(
        &mut self,
        calendar_id: impl Into<String>,
        busy: impl IntoIterator<Item = Interval>,
    ) {
        self.calendars
            .entry(calendar_id.into())
            .or_default()
            .extend(busy);
    }

    pub fn insert_failure(&mut self, calendar_id: impl Into<String>, reason: impl Into<String>) {
        self.failures.insert(calendar_id.into(), reason.into());
    }

    /// Every known calendar id (with data or a failure), sorted.
    pub fn calendar_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .calendars
            .keys()
            .chain(self.failures.keys())
            .cloned()
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// All stored intervals of all calendars, ignoring failures and windows.
    pub fn all_busy_periods(&self) -> Vec<Interval> {
        self.calendars.values().flatten().copied().collect()
    }
}

impl BusyPeriodSource for StaticBusySource {
    fn busy_periods(
        &self,
        calendar_id: &str,
        window: &SearchWindow,
    ) -> Result<Vec<Interval>, SourceError> {
        if let Some(reason) = self.failures.get(calendar_id) {
            return Err(SourceError::Unavailable {
                calendar_id: calendar_id.to_string(),
                reason: reason.clone(),
            });
        }
        let busy = self
            .calendars
            .get(calendar_id)
            .ok_or_else(|| SourceError::CalendarNotFound(calendar_id.to_string()))?;

        Ok(busy
            .iter()
            .filter(|iv| window.intersects(iv))
            .copied()
            .collect())
    }
}
