//! Tests for free slot search over a merged busy timeline.

use chrono::{DateTime, Duration, TimeZone, Utc};
use freebusy_engine::freebusy::{find_first_free_slot, find_free_slots};
use freebusy_engine::{Interval, SearchWindow};

/// Parse "HH:MM" as an instant on a fixed day.
fn at(hhmm: &str) -> DateTime<Utc> {
    let (h, m) = hhmm.split_once(':').unwrap();
    Utc.with_ymd_and_hms(2026, 3, 1, h.parse().unwrap(), m.parse().unwrap(), 0)
        .unwrap()
}

fn busy(start: &str, end: &str) -> Interval {
    Interval::new(at(start), at(end)).unwrap()
}

fn window(start: &str, end: &str) -> SearchWindow {
    SearchWindow::new(at(start), at(end)).unwrap()
}

#[test]
fn single_busy_period_produces_two_free_slots() {
    // Window: 09:00-17:00, busy: 10:00-10:30, min 30
    // Expected free: 09:00-10:00 (60 min), 10:30-17:00 (390 min)
    let slots = find_free_slots(&[busy("10:00", "10:30")], &window("09:00", "17:00"), 30);

    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].start, at("09:00"));
    assert_eq!(slots[0].end, at("10:00"));
    assert_eq!(slots[0].duration_minutes, 60);
    assert_eq!(slots[1].start, at("10:30"));
    assert_eq!(slots[1].end, at("17:00"));
    assert_eq!(slots[1].duration_minutes, 390);
}

#[test]
fn no_busy_time_entire_window_is_free() {
    let slots = find_free_slots(&[], &window("09:00", "17:00"), 30);

    assert_eq!(slots.len(), 1, "no busy time should produce one free slot");
    assert_eq!(slots[0].start, at("09:00"));
    assert_eq!(slots[0].end, at("17:00"));
    assert_eq!(slots[0].duration_minutes, 480);
}

#[test]
fn busy_period_spanning_window_leaves_nothing_free() {
    let slots = find_free_slots(&[busy("09:00", "17:00")], &window("09:00", "17:00"), 60);
    assert!(slots.is_empty());
}

#[test]
fn gap_exactly_at_threshold_is_included() {
    // 10:00-10:30 gap is exactly 30 minutes.
    let timeline = [busy("09:00", "10:00"), busy("10:30", "12:00")];
    let slots = find_free_slots(&timeline, &window("09:00", "12:00"), 30);

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].start, at("10:00"));
    assert_eq!(slots[0].end, at("10:30"));
    assert_eq!(slots[0].duration_minutes, 30);
}

#[test]
fn gap_one_minute_short_is_excluded() {
    let timeline = [busy("09:00", "10:00"), busy("10:29", "12:00")];
    let slots = find_free_slots(&timeline, &window("09:00", "12:00"), 30);
    assert!(slots.is_empty());
}

#[test]
fn partial_minutes_are_floored_before_the_threshold_test() {
    // Gap of 29m59s counts as 29 whole minutes.
    let end = at("10:00") + Duration::minutes(29) + Duration::seconds(59);
    let timeline = [
        busy("09:00", "10:00"),
        Interval::new(end, at("12:00")).unwrap(),
    ];

    assert!(find_free_slots(&timeline, &window("09:00", "12:00"), 30).is_empty());

    let slots = find_free_slots(&timeline, &window("09:00", "12:00"), 29);
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].duration_minutes, 29);
    assert_eq!(slots[0].end, end);
}

#[test]
fn busy_time_outside_window_is_ignored() {
    // Before the window, straddling both edges, and after the window.
    let timeline = [
        busy("06:00", "07:00"),
        busy("08:00", "09:30"),
        busy("16:30", "18:00"),
        busy("20:00", "21:00"),
    ];
    let slots = find_free_slots(&timeline, &window("09:00", "17:00"), 15);

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].start, at("09:30"));
    assert_eq!(slots[0].end, at("16:30"));
    assert_eq!(slots[0].duration_minutes, 420);
}

#[test]
fn busy_period_ending_at_window_start_does_not_block() {
    let slots = find_free_slots(&[busy("08:00", "09:00")], &window("09:00", "10:00"), 60);
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].start, at("09:00"));
}

#[test]
fn busy_period_starting_at_window_end_does_not_block() {
    let slots = find_free_slots(&[busy("10:00", "11:00")], &window("09:00", "10:00"), 60);
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].end, at("10:00"));
}

#[test]
fn multiple_gaps_between_busy_periods() {
    // Free: 08:00-09:00 (60), 10:00-12:00 (120), 13:00-15:00 (120), 16:00-18:00 (120)
    let timeline = [
        busy("09:00", "10:00"),
        busy("12:00", "13:00"),
        busy("15:00", "16:00"),
    ];
    let slots = find_free_slots(&timeline, &window("08:00", "18:00"), 60);

    let durations: Vec<i64> = slots.iter().map(|s| s.duration_minutes).collect();
    assert_eq!(durations, vec![60, 120, 120, 120]);
}

#[test]
fn short_gaps_are_filtered_long_gaps_kept() {
    // Free: 08:00-08:30 (30, too short), 08:45-09:00 (15, too short), 12:00-17:00 (300)
    let timeline = [busy("08:30", "08:45"), busy("09:00", "12:00")];
    let slots = find_free_slots(&timeline, &window("08:00", "17:00"), 60);

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].start, at("12:00"));
    assert_eq!(slots[0].duration_minutes, 300);
}

#[test]
fn empty_window_has_no_free_slots() {
    assert!(find_free_slots(&[], &window("09:00", "09:00"), 1).is_empty());
}

#[test]
fn find_first_free_slot_with_minimum_duration() {
    // Gaps: 08:30-09:00 (30), 12:00-17:00 (300); first >= 60 is 12:00-17:00.
    let timeline = [busy("08:00", "08:30"), busy("09:00", "12:00")];

    let slot = find_first_free_slot(&timeline, &window("08:00", "17:00"), 60)
        .expect("should find a free slot of at least 60 min");
    assert_eq!(slot.start, at("12:00"));
    assert_eq!(slot.end, at("17:00"));
    assert_eq!(slot.duration_minutes, 300);
}

#[test]
fn find_first_free_slot_no_gap_large_enough() {
    let timeline = [busy("09:00", "10:00"), busy("10:15", "12:00")];
    let slot = find_first_free_slot(&timeline, &window("09:00", "12:00"), 60);
    assert!(slot.is_none(), "no gap large enough should return None");
}
