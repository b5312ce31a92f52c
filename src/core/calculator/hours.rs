//! Hours worked, derived from a chronological list of clock events.
//!
//! Pairing is lenient:
//! - a ClockIn while a session is already open replaces the open start;
//! - a ClockOut with no open session is ignored;
//! - a trailing ClockIn with no ClockOut contributes nothing.

use crate::models::event::{Event, sort_chronologically};
use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, TimeZone};

/// Session state while scanning the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Out,
    In(DateTime<FixedOffset>),
}

impl SessionState {
    /// Apply one event. Returns the new state and the seconds accrued by the
    /// transition (non-zero only on `In --ClockOut--> Out`).
    pub fn step(self, event: &Event) -> (SessionState, i64) {
        match (self, event.action.is_in()) {
            (_, true) => (SessionState::In(event.timestamp), 0),
            (SessionState::In(start), false) => {
                (SessionState::Out, (event.timestamp - start).num_seconds())
            }
            (SessionState::Out, false) => (SessionState::Out, 0),
        }
    }
}

/// Total hours over events already filtered to one person and one window,
/// ordered ascending. Rounded to 2 decimals; `0.0` for an empty slice.
pub fn total_hours(events: &[Event]) -> f64 {
    let mut state = SessionState::Out;
    let mut total_seconds: i64 = 0;

    for ev in events {
        let (next, accrued) = state.step(ev);
        total_seconds += accrued;
        state = next;
    }

    seconds_to_hours(total_seconds)
}

/// Timestamp of the trailing unmatched ClockIn, if any.
pub fn open_session(events: &[Event]) -> Option<DateTime<FixedOffset>> {
    match events.iter().fold(SessionState::Out, |s, ev| s.step(ev).0) {
        SessionState::In(start) => Some(start),
        SessionState::Out => None,
    }
}

/// Hours for `person` on calendar `day` as seen in `tz`.
pub fn hours_for_day<Tz: TimeZone>(events: &[Event], person: &str, day: NaiveDate, tz: &Tz) -> f64 {
    let selected = select(events, |ev| {
        ev.person == person && ev.local_date(tz) == day
    });
    total_hours(&selected)
}

/// Hours for `person` from the Monday of `reference`'s ISO week onwards.
/// No upper bound.
pub fn hours_for_week<Tz: TimeZone>(
    events: &[Event],
    person: &str,
    reference: &DateTime<Tz>,
    tz: &Tz,
) -> f64 {
    let monday = start_of_week(reference.with_timezone(tz).date_naive());
    let selected = select(events, |ev| {
        ev.person == person && ev.local_date(tz) >= monday
    });
    total_hours(&selected)
}

/// Most recent Monday at or before `day`.
pub fn start_of_week(day: NaiveDate) -> NaiveDate {
    let back = u64::from(day.weekday().num_days_from_monday());
    day.checked_sub_days(Days::new(back)).unwrap_or(day)
}

/// Seconds → hours, rounded to 2 decimals.
pub fn seconds_to_hours(seconds: i64) -> f64 {
    round2(seconds as f64 / 3600.0)
}

/// Round the exact binary value to 2 decimals (ties to even), so 54s is
/// 0.01 and not 0.02: `0.015` is really `0.01499…` once stored.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

fn select<F>(events: &[Event], keep: F) -> Vec<Event>
where
    F: Fn(&Event) -> bool,
{
    let mut out: Vec<Event> = events.iter().filter(|ev| keep(ev)).cloned().collect();
    sort_chronologically(&mut out);
    out
}
