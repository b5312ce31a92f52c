mod common;
use common::{clock_in, clock_out, ts};

use chrono::NaiveDate;
use chrono_tz::Tz;
use punchclock::core::calculator::hours::{
    hours_for_day, hours_for_week, open_session, round2, start_of_week, total_hours,
};
use punchclock::core::calculator::sessions::{build_sessions, closed_seconds};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn test_empty_log_is_zero() {
    assert_eq!(total_hours(&[]), 0.0);
}

#[test]
fn test_single_full_day() {
    let events = vec![
        clock_in("Suchi", "2024-01-01T09:00:00+00:00"),
        clock_out("Suchi", "2024-01-01T17:00:00+00:00"),
    ];
    assert_eq!(total_hours(&events), 8.0);
}

#[test]
fn test_multiple_pairs_are_summed() {
    let events = vec![
        clock_in("Suchi", "2024-01-01T09:00:00+00:00"),
        clock_out("Suchi", "2024-01-01T12:00:00+00:00"),
        clock_in("Suchi", "2024-01-01T13:00:00+00:00"),
        clock_out("Suchi", "2024-01-01T17:30:00+00:00"),
    ];
    assert_eq!(total_hours(&events), 7.5);
}

#[test]
fn test_trailing_clock_in_counts_nothing() {
    let only_in = vec![clock_in("Suchi", "2024-01-01T09:00:00+00:00")];
    assert_eq!(total_hours(&only_in), 0.0);

    let pair_then_open = vec![
        clock_in("Suchi", "2024-01-01T09:00:00+00:00"),
        clock_out("Suchi", "2024-01-01T10:00:00+00:00"),
        clock_in("Suchi", "2024-01-01T11:00:00+00:00"),
    ];
    assert_eq!(total_hours(&pair_then_open), 1.0);
    assert_eq!(
        open_session(&pair_then_open),
        Some(ts("2024-01-01T11:00:00+00:00"))
    );
}

#[test]
fn test_orphan_clock_out_is_ignored() {
    let only_out = vec![clock_out("Suchi", "2024-01-01T17:00:00+00:00")];
    assert_eq!(total_hours(&only_out), 0.0);

    let leading_out = vec![
        clock_out("Suchi", "2024-01-01T08:00:00+00:00"),
        clock_in("Suchi", "2024-01-01T09:00:00+00:00"),
        clock_out("Suchi", "2024-01-01T10:00:00+00:00"),
        clock_out("Suchi", "2024-01-01T11:00:00+00:00"),
    ];
    assert_eq!(total_hours(&leading_out), 1.0);
}

#[test]
fn test_double_clock_in_discards_the_first() {
    let events = vec![
        clock_in("Suchi", "2024-01-01T08:00:00+00:00"),
        clock_in("Suchi", "2024-01-01T09:00:00+00:00"),
        clock_out("Suchi", "2024-01-01T12:00:00+00:00"),
    ];
    // (t3 - t2), not (t3 - t1)
    assert_eq!(total_hours(&events), 3.0);
}

#[test]
fn test_rounding_to_two_decimals() {
    let events = vec![
        clock_in("Suchi", "2024-01-01T09:00:00+00:00"),
        clock_out("Suchi", "2024-01-01T09:20:00+00:00"),
    ];
    assert_eq!(total_hours(&events), 0.33);

    let seconds = vec![
        clock_in("Suchi", "2024-01-01T09:00:00+00:00"),
        clock_out("Suchi", "2024-01-01T09:00:59+00:00"),
    ];
    assert_eq!(total_hours(&seconds), 0.02);
}

#[test]
fn test_rounding_uses_the_exact_stored_value() {
    // 54s = 0.015 h, stored just below the tie
    let events = vec![
        clock_in("Suchi", "2024-01-01T09:00:00+00:00"),
        clock_out("Suchi", "2024-01-01T09:00:54+00:00"),
    ];
    assert_eq!(total_hours(&events), 0.01);

    // 162s = 0.045 h
    let events = vec![
        clock_in("Suchi", "2024-01-01T09:00:00+00:00"),
        clock_out("Suchi", "2024-01-01T09:02:42+00:00"),
    ];
    assert_eq!(total_hours(&events), 0.04);

    assert_eq!(round2(2.675), 2.67);
    assert_eq!(round2(-1.005), -1.0);
    assert_eq!(round2(7.0), 7.0);
}

#[test]
fn test_total_hours_is_idempotent() {
    let events = vec![
        clock_in("Suchi", "2024-01-01T09:00:00+00:00"),
        clock_out("Suchi", "2024-01-01T11:45:00+00:00"),
    ];
    let first = total_hours(&events);
    let second = total_hours(&events);
    assert_eq!(first, second);
    assert_eq!(first, 2.75);
}

#[test]
fn test_hours_for_day_without_events_is_zero() {
    let events = vec![
        clock_in("Suchi", "2024-01-01T09:00:00+00:00"),
        clock_out("Suchi", "2024-01-01T17:00:00+00:00"),
    ];
    assert_eq!(hours_for_day(&events, "Suchi", day(2024, 1, 2), &Tz::UTC), 0.0);
    assert_eq!(hours_for_day(&[], "Suchi", day(2024, 1, 1), &Tz::UTC), 0.0);
}

#[test]
fn test_hours_for_day_filters_person_and_sorts() {
    // out of order on purpose, and interleaved with someone else
    let events = vec![
        clock_out("Suchi", "2024-01-01T17:00:00+00:00"),
        clock_in("Dharshine", "2024-01-01T08:00:00+00:00"),
        clock_in("Suchi", "2024-01-01T09:00:00+00:00"),
        clock_out("Dharshine", "2024-01-01T10:00:00+00:00"),
    ];
    assert_eq!(hours_for_day(&events, "Suchi", day(2024, 1, 1), &Tz::UTC), 8.0);
    assert_eq!(
        hours_for_day(&events, "Dharshine", day(2024, 1, 1), &Tz::UTC),
        2.0
    );
    assert_eq!(hours_for_day(&events, "Nobody", day(2024, 1, 1), &Tz::UTC), 0.0);
}

#[test]
fn test_hours_for_day_uses_the_configured_timezone() {
    // 23:30-01:30 UTC is 00:30-02:30 on Jan 2nd in Rome
    let events = vec![
        clock_in("Suchi", "2024-01-01T23:30:00+00:00"),
        clock_out("Suchi", "2024-01-02T01:30:00+00:00"),
    ];
    let rome: Tz = "Europe/Rome".parse().expect("known zone");

    assert_eq!(hours_for_day(&events, "Suchi", day(2024, 1, 2), &rome), 2.0);
    assert_eq!(hours_for_day(&events, "Suchi", day(2024, 1, 1), &rome), 0.0);

    // in UTC the session straddles midnight: each day sees an orphan
    assert_eq!(hours_for_day(&events, "Suchi", day(2024, 1, 1), &Tz::UTC), 0.0);
    assert_eq!(hours_for_day(&events, "Suchi", day(2024, 1, 2), &Tz::UTC), 0.0);
}

#[test]
fn test_start_of_week_is_monday() {
    // 2024-01-01 is a Monday
    assert_eq!(start_of_week(day(2024, 1, 1)), day(2024, 1, 1));
    assert_eq!(start_of_week(day(2024, 1, 3)), day(2024, 1, 1));
    assert_eq!(start_of_week(day(2024, 1, 7)), day(2024, 1, 1));
    assert_eq!(start_of_week(day(2024, 1, 8)), day(2024, 1, 8));
}

#[test]
fn test_hours_for_week_scenario() {
    let events = vec![
        // previous Sunday: outside the week
        clock_in("Suchi", "2023-12-31T09:00:00+00:00"),
        clock_out("Suchi", "2023-12-31T17:00:00+00:00"),
        // Monday
        clock_in("Suchi", "2024-01-01T09:00:00+00:00"),
        clock_out("Suchi", "2024-01-01T12:00:00+00:00"),
        clock_in("Suchi", "2024-01-01T13:00:00+00:00"),
        clock_out("Suchi", "2024-01-01T17:00:00+00:00"),
    ];

    let wednesday = ts("2024-01-03T10:00:00+00:00").with_timezone(&Tz::UTC);
    assert_eq!(hours_for_week(&events, "Suchi", &wednesday, &Tz::UTC), 7.0);

    let monday = ts("2024-01-01T18:00:00+00:00").with_timezone(&Tz::UTC);
    assert_eq!(hours_for_week(&events, "Suchi", &monday, &Tz::UTC), 7.0);
}

#[test]
fn test_sessions_match_total_hours() {
    let events = vec![
        clock_out("Suchi", "2024-01-01T07:00:00+00:00"),
        clock_in("Suchi", "2024-01-01T08:00:00+00:00"),
        clock_in("Suchi", "2024-01-01T09:00:00+00:00"),
        clock_out("Suchi", "2024-01-01T12:00:00+00:00"),
        clock_in("Suchi", "2024-01-01T13:00:00+00:00"),
        clock_out("Suchi", "2024-01-01T14:30:00+00:00"),
        clock_in("Suchi", "2024-01-01T15:00:00+00:00"),
    ];

    let sessions = build_sessions(&events);
    assert_eq!(sessions.len(), 3);
    assert_eq!(sessions[0].start, ts("2024-01-01T09:00:00+00:00"));
    assert_eq!(sessions[0].hours, 3.0);
    assert_eq!(sessions[1].hours, 1.5);
    assert!(sessions[2].is_open());
    assert_eq!(sessions[2].hours, 0.0);

    assert_eq!(closed_seconds(&sessions), 4 * 3600 + 30 * 60);
    assert_eq!(total_hours(&events), 4.5);
}
