use crate::core::calculator::hours::{SessionState, seconds_to_hours};
use crate::models::event::Event;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// One reconstructed work session, for display.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Session {
    pub role: String,
    pub start: DateTime<FixedOffset>,
    pub end: Option<DateTime<FixedOffset>>,
    pub seconds: i64,
    pub hours: f64,
}

impl Session {
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }
}

/// Rebuild the session list with the same pairing rules as `total_hours`:
/// a replaced ClockIn is dropped, orphan ClockOuts produce nothing, a
/// trailing ClockIn yields one open session worth zero hours.
///
/// Input must already be sorted ascending.
pub fn build_sessions(events: &[Event]) -> Vec<Session> {
    let mut sessions = Vec::new();
    let mut state = SessionState::Out;
    let mut open_role = String::new();

    for ev in events {
        let (next, seconds) = state.step(ev);

        match (state, next) {
            (SessionState::In(start), SessionState::Out) => sessions.push(Session {
                role: std::mem::take(&mut open_role),
                start,
                end: Some(ev.timestamp),
                seconds,
                hours: seconds_to_hours(seconds),
            }),
            (_, SessionState::In(_)) => open_role = ev.role.clone(),
            _ => {}
        }

        state = next;
    }

    if let SessionState::In(start) = state {
        sessions.push(Session {
            role: open_role,
            start,
            end: None,
            seconds: 0,
            hours: 0.0,
        });
    }

    sessions
}

/// Sum of closed sessions, in seconds.
pub fn closed_seconds(sessions: &[Session]) -> i64 {
    sessions.iter().map(|s| s.seconds).sum()
}
