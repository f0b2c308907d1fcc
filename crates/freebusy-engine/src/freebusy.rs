//! Compute free time slots from a merged busy timeline.
//!
//! Walks the timeline with a cursor starting at the window start, emitting the
//! gaps between busy periods that meet a minimum duration.

use crate::interval::{Interval, SearchWindow};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A free time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl FreeSlot {
    fn from_gap(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        }
    }
}

/// Find free time slots of at least `min_duration_minutes` within `window`.
///
/// `busy` must be a merged timeline (see [`crate::merge::merge_busy_periods`]):
/// sorted by start with no overlapping or touching neighbours. Busy periods may
/// extend beyond the window on either side.
///
/// The duration test is inclusive and counts whole minutes, so a gap of exactly
/// `min_duration_minutes` qualifies. Returns slots sorted by start time.
pub fn find_free_slots(
    busy: &[Interval],
    window: &SearchWindow,
    min_duration_minutes: i64,
) -> Vec<FreeSlot> {
    let mut free_slots = Vec::new();
    let mut cursor = window.range_start;

    for period in busy {
        if period.end <= cursor {
            continue;
        }
        // Sorted input: nothing from here on can touch the window.
        if period.start >= window.range_end {
            break;
        }
        if period.start > cursor {
            let slot = FreeSlot::from_gap(cursor, period.start);
            if slot.duration_minutes >= min_duration_minutes {
                free_slots.push(slot);
            }
        }
        cursor = cursor.max(period.end);
    }

    // Trailing free slot after the last busy period.
    if cursor < window.range_end {
        let slot = FreeSlot::from_gap(cursor, window.range_end);
        if slot.duration_minutes >= min_duration_minutes {
            free_slots.push(slot);
        }
    }

    free_slots
}

/// Find the first free slot of at least `min_duration_minutes` within the window.
///
/// Delegates to [`find_free_slots`] and returns its earliest slot.
pub fn find_first_free_slot(
    busy: &[Interval],
    window: &SearchWindow,
    min_duration_minutes: i64,
) -> Option<FreeSlot> {
    find_free_slots(busy, window, min_duration_minutes)
        .into_iter()
        .next()
}
