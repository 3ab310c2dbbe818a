//! Tests for the overlap predicate and conflict listing.

use cadence_engine::{find_conflicts, intervals_overlap, Event, EventDuration};

const NY: &str = "America/New_York";
const LA: &str = "America/Los_Angeles";

fn event(date: &str, time: &str, zone: &str) -> Event {
    Event::new(date, time, zone).unwrap()
}

fn lasting(date: &str, time: &str, zone: &str, minutes: u32) -> Event {
    event(date, time, zone).lasting(EventDuration::from_minutes(minutes))
}

// ---------------------------------------------------------------------------
// Pure predicate
// ---------------------------------------------------------------------------

#[test]
fn instants_overlap_only_when_equal() {
    assert!(intervals_overlap(1_000, None, 1_000, None));
    assert!(!intervals_overlap(1_000, None, 1_001, None));
}

#[test]
fn instant_at_start_of_interval_overlaps() {
    assert!(intervals_overlap(1_000, None, 1_000, Some(30)));
    assert!(intervals_overlap(1_000, Some(30), 1_000, None));
}

#[test]
fn instant_inside_interval_overlaps() {
    assert!(intervals_overlap(1_030, None, 1_000, Some(1)));
}

#[test]
fn instant_at_end_of_interval_does_not_overlap() {
    assert!(!intervals_overlap(1_060, None, 1_000, Some(1)));
}

#[test]
fn zero_length_intervals_never_overlap() {
    assert!(!intervals_overlap(1_000, Some(0), 1_060, Some(0)));
    assert!(!intervals_overlap(1_000, Some(0), 1_000, Some(0)));
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[test]
fn no_duration_same_instant_in_different_zones() {
    let pst = event("2025-02-01", "12:00", LA);
    let est = pst.in_zone(NY).unwrap();
    assert!(pst.overlaps(&est));

    let est_noon = event("2025-02-01", "12:00", NY);
    assert!(!pst.overlaps(&est_noon));
}

#[test]
fn with_duration() {
    let event1 = lasting("2025-02-01", "12:00", NY, 60);
    // 30 minutes after event1 starts.
    let event2 = lasting("2025-02-01", "09:30", LA, 60);
    // Exactly when event1 ends.
    let event3 = lasting("2025-02-01", "10:00", LA, 30);

    assert!(event1.overlaps(&event2));
    assert!(event2.overlaps(&event1));

    assert!(event2.overlaps(&event3));
    assert!(event3.overlaps(&event2));

    assert!(!event1.overlaps(&event3));
    assert!(!event3.overlaps(&event1));
}

#[test]
fn overlap_ignores_payload_types() {
    let a = lasting("2025-02-01", "12:00", NY, 60).with_info(1u8);
    let b = lasting("2025-02-01", "12:30", NY, 15).with_info("x".to_string());
    assert!(a.overlaps(&b));
}

// ---------------------------------------------------------------------------
// Conflict listing
// ---------------------------------------------------------------------------

#[test]
fn two_overlapping_events_detected() {
    let a = vec![lasting("2026-03-02", "09:00", NY, 60)];
    let b = vec![lasting("2026-03-02", "09:30", NY, 60)];

    let conflicts = find_conflicts(&a, &b);

    assert_eq!(conflicts.len(), 1, "should detect exactly one conflict");
    assert_eq!(conflicts[0].overlap_minutes, 30);
}

#[test]
fn adjacent_events_not_a_conflict() {
    let a = vec![lasting("2026-03-02", "09:00", NY, 60)];
    let b = vec![lasting("2026-03-02", "10:00", NY, 60)];

    assert!(
        find_conflicts(&a, &b).is_empty(),
        "adjacent events (end == start) should not be conflicts"
    );
}

#[test]
fn fully_contained_event_correct_overlap() {
    let a = vec![lasting("2026-03-02", "09:00", NY, 180)];
    let b = vec![lasting("2026-03-02", "10:00", NY, 60)];

    let conflicts = find_conflicts(&a, &b);

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].overlap_minutes, 60);
}

#[test]
fn multiple_conflicts_all_found() {
    let a = vec![
        lasting("2026-03-02", "09:00", NY, 60),
        lasting("2026-03-02", "14:00", NY, 60),
    ];
    let b = vec![
        lasting("2026-03-02", "09:30", NY, 60),
        lasting("2026-03-02", "14:30", NY, 60),
    ];

    let conflicts = find_conflicts(&a, &b);

    assert_eq!(conflicts.len(), 2, "should find both conflicts");
    assert!(conflicts.iter().all(|c| c.overlap_minutes == 30));
    assert_eq!(conflicts[0].event_a.event_id(), a[0].event_id());
    assert_eq!(conflicts[1].event_b.event_id(), b[1].event_id());
}

#[test]
fn instant_conflict_has_zero_minutes() {
    let a = vec![event("2026-03-02", "09:00", NY)];
    let b = vec![lasting("2026-03-02", "09:00", NY, 30)];

    let conflicts = find_conflicts(&a, &b);

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].overlap_minutes, 0);
}

#[test]
fn empty_event_lists_no_conflicts() {
    let none: Vec<Event> = Vec::new();
    assert!(find_conflicts(&none, &none).is_empty());

    let a = vec![lasting("2026-03-02", "09:00", NY, 60)];
    assert!(find_conflicts(&a, &none).is_empty());
}
