//! Multi-calendar availability: validate a request, gather busy periods from
//! every calendar, merge them, and search the window for free slots.
//!
//! This is the entry point a caller uses. A calendar whose source query fails
//! contributes no busy time; its id is reported back in
//! [`AvailabilityResponse::unavailable_calendars`] so the caller can surface it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{AvailabilityError, Result};
use crate::freebusy::{self, FreeSlot};
use crate::interval::{Interval, SearchWindow};
use crate::merge::{self, RawBusyData};
use crate::source::BusyPeriodSource;

/// A request for the shared free time of several calendars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRequest {
    /// Calendars to query. Must not be empty; duplicates are queried once.
    pub calendar_ids: Vec<String>,
    /// Start of the search window.
    pub range_start: DateTime<Utc>,
    /// End of the search window.
    pub range_end: DateTime<Utc>,
    /// Minimum length of a returned free slot, in whole minutes. Must be positive.
    pub min_duration_minutes: i64,
}

impl AvailabilityRequest {
    pub fn new(
        calendar_ids: impl IntoIterator<Item = impl Into<String>>,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
        min_duration_minutes: i64,
    ) -> Self {
        Self {
            calendar_ids: calendar_ids.into_iter().map(Into::into).collect(),
            range_start,
            range_end,
            min_duration_minutes,
        }
    }

    /// Check the request and build its search window.
    ///
    /// # Errors
    /// - `EmptyCalendarIds` if no calendar id was given.
    /// - `NonPositiveDuration` if `min_duration_minutes <= 0`.
    /// - `InvertedRange` if `range_start > range_end`.
    pub fn validate(&self) -> Result<SearchWindow> {
        if self.calendar_ids.is_empty() {
            return Err(AvailabilityError::EmptyCalendarIds);
        }
        if self.min_duration_minutes <= 0 {
            return Err(AvailabilityError::NonPositiveDuration(
                self.min_duration_minutes,
            ));
        }
        SearchWindow::new(self.range_start, self.range_end)
    }

    /// Calendar ids in request order with later duplicates removed.
    fn unique_calendar_ids(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.calendar_ids
            .iter()
            .map(String::as_str)
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

/// Result of an availability search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    /// Qualifying free slots, earliest first. Empty when nothing qualifies.
    pub free_slots: Vec<FreeSlot>,
    /// The merged busy timeline across all calendars (sorted, non-overlapping).
    pub merged_busy_periods: Vec<Interval>,
    /// Calendars whose busy data could not be fetched and were treated as free.
    pub unavailable_calendars: Vec<String>,
}

/// Compute the shared free time of every calendar in `request`.
///
/// The request is validated before `source` is queried. Each unique calendar id
/// is queried exactly once; failures are logged and folded in as empty.
///
/// # Errors
/// Returns the validation error from [`AvailabilityRequest::validate`]. Missing
/// calendar data and an empty result are not errors.
pub fn find_availability<S>(
    source: &S,
    request: &AvailabilityRequest,
) -> Result<AvailabilityResponse>
where
    S: BusyPeriodSource + ?Sized,
{
    let window = request.validate()?;

    let mut raw = RawBusyData::new();
    let mut unavailable_calendars = Vec::new();

    for calendar_id in request.unique_calendar_ids() {
        match source.busy_periods(calendar_id, &window) {
            Ok(busy) => {
                debug!(calendar_id, periods = busy.len(), "fetched busy periods");
                raw.insert(calendar_id.to_string(), busy);
            }
            Err(err) => {
                warn!(calendar_id, error = %err, "calendar unavailable, treating as free");
                unavailable_calendars.push(calendar_id.to_string());
            }
        }
    }

    Ok(solve(
        &raw,
        &window,
        request.min_duration_minutes,
        unavailable_calendars,
    ))
}

/// Merge already-fetched busy data and search `window` for free slots.
///
/// Use this when the caller gathered [`RawBusyData`] itself. `window` and
/// `min_duration_minutes` are assumed valid.
pub fn find_availability_in(
    raw: &RawBusyData,
    window: &SearchWindow,
    min_duration_minutes: i64,
) -> AvailabilityResponse {
    solve(raw, window, min_duration_minutes, Vec::new())
}

fn solve(
    raw: &RawBusyData,
    window: &SearchWindow,
    min_duration_minutes: i64,
    unavailable_calendars: Vec<String>,
) -> AvailabilityResponse {
    let merged_busy_periods = merge::merge_busy_data(raw);
    let free_slots = freebusy::find_free_slots(&merged_busy_periods, window, min_duration_minutes);

    debug!(
        calendars = raw.len(),
        busy = merged_busy_periods.len(),
        free = free_slots.len(),
        "availability computed"
    );

    AvailabilityResponse {
        free_slots,
        merged_busy_periods,
        unavailable_calendars,
    }
}
