//! Tests for `all_before`.

use cadence_engine::{Event, Recurrence, Weekday};

const NY: &str = "America/New_York";

fn event(date: &str) -> Event {
    Event::new(date, "11:30", NY).unwrap()
}

fn at(date: &str) -> i64 {
    event(date).timestamp()
}

fn stamps(events: &[Event]) -> Vec<i64> {
    events.iter().map(Event::timestamp).collect()
}

fn mwf() -> Recurrence {
    Recurrence::on([Weekday::Monday, Weekday::Wednesday, Weekday::Friday])
}

#[test]
fn all_sessions_before_a_date() {
    let e = event("2025-02-03").every(mwf());

    let all = e.all_before("2025-03-01").unwrap();

    assert_eq!(all.len(), 12);
    assert_eq!(
        stamps(&all),
        [
            "2025-02-03", "2025-02-05", "2025-02-07", "2025-02-10", "2025-02-12", "2025-02-14",
            "2025-02-17", "2025-02-19", "2025-02-21", "2025-02-24", "2025-02-26", "2025-02-28",
        ]
        .iter()
        .map(|d| at(d))
        .collect::<Vec<_>>()
    );
}

#[test]
fn weekly_event_with_single_occurrence_before_cutoff() {
    let e = event("2025-02-25").every(Recurrence::weekly());
    assert_eq!(stamps(&e.all_before("2025-03-01").unwrap()), vec![at("2025-02-25")]);
}

#[test]
fn occurrence_on_cutoff_date_is_not_included() {
    let e = event("2025-03-01").every(Recurrence::weekly());
    assert!(e.all_before("2025-03-01").unwrap().is_empty());
}

#[test]
fn one_off_event_yields_at_most_one() {
    let e = event("2025-02-25");
    assert_eq!(stamps(&e.all_before("2026-01-01").unwrap()), vec![at("2025-02-25")]);
    assert!(e.all_before("2025-02-01").unwrap().is_empty());
}

#[test]
fn exclusions_are_respected() {
    let e = event("2025-02-03").every(mwf()).except(at("2025-02-12"));

    let all = e.all_before("2025-03-01").unwrap();

    assert_eq!(all.len(), 11);
    assert!(!stamps(&all).contains(&at("2025-02-12")));
}

#[test]
fn receiver_is_left_untouched() {
    let e = event("2025-02-03").every(mwf()).except(at("2025-02-12"));
    let before = e.clone();

    e.all_before("2025-03-01").unwrap();

    assert_eq!(e, before);
}

#[test]
fn stepping_across_dst_keeps_wall_clock() {
    let e = event("2025-03-03").every(Recurrence::weekly());

    let all = e.all_before("2025-03-20").unwrap();

    assert_eq!(
        stamps(&all),
        vec![at("2025-03-03"), at("2025-03-10"), at("2025-03-17")]
    );
    assert!(all.iter().all(|o| o.hour() == 11 && o.minute() == 30));
}

#[test]
fn invalid_cutoff_date_is_an_error() {
    let e = event("2025-02-03").every(mwf());
    assert!(e.all_before("March first").is_err());
}
