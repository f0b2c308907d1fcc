//! Merge raw busy periods from many calendars into one canonical timeline.
//!
//! The output is sorted by start time and maximal: no two consecutive
//! intervals overlap or touch. Intervals whose boundaries meet exactly
//! (`next.start == prev.end`) are merged into one.

use crate::interval::Interval;
use std::collections::BTreeMap;

/// Raw busy intervals keyed by calendar id, as reported by a busy-period source.
///
/// A calendar that reported nothing may be missing or map to an empty list.
pub type RawBusyData = BTreeMap<String, Vec<Interval>>;

/// Collect every calendar's intervals into a single unordered list.
pub fn flatten_busy_data(raw: &RawBusyData) -> Vec<Interval> {
    raw.values().flat_map(|busy| busy.iter().copied()).collect()
}

/// Merge overlapping or touching busy periods.
///
/// Accepts intervals in any order. Zero-length intervals cover no time and
/// are dropped. Returns a new sorted, non-overlapping list; the input slice
/// is never modified.
pub fn merge_busy_periods(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted: Vec<Interval> = intervals
        .iter()
        .filter(|iv| !iv.is_empty())
        .copied()
        .collect();

    // Sort by start time (then by end time for stability).
    sorted.sort_by_key(|iv| (iv.start, iv.end));

    sorted
        .into_iter()
        .fold(Vec::new(), |mut merged: Vec<Interval>, next| {
            match merged.last_mut() {
                // Overlapping or touching: extend the accumulator.
                Some(current) if next.start <= current.end => {
                    current.end = current.end.max(next.end);
                }
                _ => merged.push(next),
            }
            merged
        })
}

/// Flatten and merge in one step.
pub fn merge_busy_data(raw: &RawBusyData) -> Vec<Interval> {
    merge_busy_periods(&flatten_busy_data(raw))
}
