//! WASM bindings for freebusy-engine.
//!
//! Exposes busy-period merging, free slot search, and the multi-calendar
//! availability solver to JavaScript via `wasm-bindgen`. All complex types are
//! passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p freebusy-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/freebusy_wasm.wasm
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use freebusy_engine::{
    AvailabilityError, AvailabilityRequest, FreeSlot, Interval, SearchWindow, StaticBusySource,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct IntervalDto {
    start: String,
    end: String,
}

impl From<&Interval> for IntervalDto {
    fn from(iv: &Interval) -> Self {
        Self {
            start: iv.start.to_rfc3339(),
            end: iv.end.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FreeSlotDto {
    start: String,
    end: String,
    duration_minutes: i64,
}

impl From<&FreeSlot> for FreeSlotDto {
    fn from(s: &FreeSlot) -> Self {
        Self {
            start: s.start.to_rfc3339(),
            end: s.end.to_rfc3339(),
            duration_minutes: s.duration_minutes,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityDto {
    free_slots: Vec<FreeSlotDto>,
    merged_busy_periods: Vec<IntervalDto>,
    unavailable_calendars: Vec<String>,
}

/// Input format for busy periods passed from JavaScript.
#[derive(Deserialize)]
struct IntervalInput {
    start: String,
    end: String,
}

/// Input format for an availability request passed from JavaScript.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestInput {
    calendar_ids: Vec<String>,
    range_start: String,
    range_end: String,
    min_duration_minutes: i64,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts both RFC 3339 (with timezone offset, e.g., "2026-02-17T14:00:00+00:00")
/// and naive time (e.g., "2026-02-17T14:00:00"), which is interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    // Try RFC 3339 first (has timezone info).
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    // Fall back to naive datetime interpreted as UTC.
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| format!("Invalid datetime '{}': {}", s, e))
}

fn to_interval(input: &IntervalInput) -> Result<Interval, String> {
    let start = parse_datetime(&input.start)?;
    let end = parse_datetime(&input.end)?;
    Interval::new(start, end).map_err(|e| e.to_string())
}

/// Convert a JSON array of `{start, end}` objects into `Vec<Interval>`.
fn parse_intervals_json(json: &str) -> Result<Vec<Interval>, String> {
    let inputs: Vec<IntervalInput> =
        serde_json::from_str(json).map_err(|e| format!("Invalid intervals JSON: {}", e))?;
    inputs.iter().map(to_interval).collect()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn to_js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

// ---------------------------------------------------------------------------
// JSON-string API (target independent)
// ---------------------------------------------------------------------------

fn merge_busy_periods_json(intervals_json: &str) -> Result<String, String> {
    let intervals = parse_intervals_json(intervals_json)?;
    let merged = freebusy_engine::merge_busy_periods(&intervals);

    let dtos: Vec<IntervalDto> = merged.iter().map(IntervalDto::from).collect();
    to_json(&dtos)
}

fn find_free_slots_json(
    intervals_json: &str,
    window_start: &str,
    window_end: &str,
    min_duration_minutes: i64,
) -> Result<String, String> {
    if min_duration_minutes <= 0 {
        return Err(AvailabilityError::NonPositiveDuration(min_duration_minutes).to_string());
    }
    let intervals = parse_intervals_json(intervals_json)?;
    let window = SearchWindow::new(parse_datetime(window_start)?, parse_datetime(window_end)?)
        .map_err(|e| e.to_string())?;

    let merged = freebusy_engine::merge_busy_periods(&intervals);
    let slots = freebusy_engine::find_free_slots(&merged, &window, min_duration_minutes);

    let dtos: Vec<FreeSlotDto> = slots.iter().map(FreeSlotDto::from).collect();
    to_json(&dtos)
}

fn find_availability_json(busy_json: &str, request_json: &str) -> Result<String, String> {
    let calendars: BTreeMap<String, Vec<IntervalInput>> =
        serde_json::from_str(busy_json).map_err(|e| format!("Invalid busy JSON: {}", e))?;
    let input: RequestInput =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid request JSON: {}", e))?;

    let request = AvailabilityRequest::new(
        input.calendar_ids,
        parse_datetime(&input.range_start)?,
        parse_datetime(&input.range_end)?,
        input.min_duration_minutes,
    );

    let mut source = StaticBusySource::new();
    for (calendar_id, periods) in &calendars {
        let intervals = periods
            .iter()
            .map(to_interval)
            .collect::<Result<Vec<_>, _>>()?;
        source.insert_calendar(calendar_id.clone(), intervals);
    }

    let response =
        freebusy_engine::find_availability(&source, &request).map_err(|e| e.to_string())?;

    to_json(&AvailabilityDto {
        free_slots: response.free_slots.iter().map(FreeSlotDto::from).collect(),
        merged_busy_periods: response
            .merged_busy_periods
            .iter()
            .map(IntervalDto::from)
            .collect(),
        unavailable_calendars: response.unavailable_calendars,
    })
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Merge overlapping or touching busy periods into a sorted timeline.
///
/// `intervals_json` must be a JSON array of `{start, end}` objects. Returns a JSON
/// array of merged `{start, end}` objects with RFC 3339 datetime strings.
#[wasm_bindgen(js_name = "mergeBusyPeriods")]
pub fn merge_busy_periods(intervals_json: &str) -> Result<String, JsValue> {
    merge_busy_periods_json(intervals_json).map_err(to_js_error)
}

/// Find free slots of at least `min_duration_minutes` within a window.
///
/// `intervals_json` is a JSON array of raw `{start, end}` busy periods (merged
/// internally). Returns a JSON array of `{start, end, durationMinutes}` objects.
/// A `min_duration_minutes` of zero or less is rejected.
#[wasm_bindgen(js_name = "findFreeSlots")]
pub fn find_free_slots(
    intervals_json: &str,
    window_start: &str,
    window_end: &str,
    min_duration_minutes: i64,
) -> Result<String, JsValue> {
    find_free_slots_json(intervals_json, window_start, window_end, min_duration_minutes)
        .map_err(to_js_error)
}

/// Solve a multi-calendar availability request.
///
/// `busy_json` maps calendar ids to arrays of `{start, end}` busy periods.
/// `request_json` is `{calendarIds, rangeStart, rangeEnd, minDurationMinutes}`.
/// Requested calendars missing from `busy_json` are reported in
/// `unavailableCalendars`. Returns `{freeSlots, mergedBusyPeriods,
/// unavailableCalendars}`.
#[wasm_bindgen(js_name = "findAvailability")]
pub fn find_availability(busy_json: &str, request_json: &str) -> Result<String, JsValue> {
    find_availability_json(busy_json, request_json).map_err(to_js_error)
}
