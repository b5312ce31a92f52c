//! Recording a clock action.

use crate::core::calculator::hours::open_session;
use crate::core::clock::Clock;
use crate::core::report::summarize;
use crate::errors::{AppError, AppResult};
use crate::models::action::Action;
use crate::models::event::{Event, sort_chronologically};
use crate::models::summary::HoursSummary;
use crate::store::LogStore;
use crate::utils::date::truncate_to_seconds;
use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;

/// Sequence oddities that are accepted but worth telling the user about.
#[derive(Debug, Clone, PartialEq)]
pub enum PunchWarning {
    /// Clocking in while already in: the earlier start is discarded.
    ReplacesOpenSession(DateTime<FixedOffset>),
    /// Clocking out with nothing open: the event counts for nothing.
    NoOpenSession,
}

#[derive(Debug, Clone)]
pub struct PunchOutcome {
    pub event: Event,
    pub summary: HoursSummary,
    pub warning: Option<PunchWarning>,
}

pub struct PunchLogic;

impl PunchLogic {
    /// Record `action` for `person`.
    ///
    /// 1. timestamp = `at` or now, to the second
    /// 2. totals recomputed over history + the new event (display snapshot)
    /// 3. event appended with the snapshot
    pub fn record(
        store: &mut dyn LogStore,
        clock: &dyn Clock,
        tz: Tz,
        person: &str,
        role: &str,
        action: Action,
        at: Option<DateTime<FixedOffset>>,
    ) -> AppResult<PunchOutcome> {
        let person = person.trim();
        if person.is_empty() {
            return Err(AppError::MissingPerson);
        }

        let now = clock.now(tz);
        let timestamp = truncate_to_seconds(at.unwrap_or_else(|| now.fixed_offset()));

        let mut history = store.all_events_for(person)?;
        sort_chronologically(&mut history);

        let warning = Self::check_sequence(&history, action, &timestamp);
        if let Some(w) = &warning {
            tracing::warn!(person, ?w, "lenient sequence");
        }

        let mut event = Event::new(person, role.trim(), action, timestamp);

        history.push(event.clone());
        let summary = summarize(&history, person, &now, &tz);
        event = event.with_snapshot(summary.today, summary.week);

        event.id = store.append(&event)?;

        // audit is best effort
        if let Err(e) = store.audit(
            action.to_db_str(),
            person,
            &format!("{} at {}", action.label(), event.timestamp.to_rfc3339()),
        ) {
            tracing::warn!(error = %e, "failed to write audit row");
        }

        Ok(PunchOutcome {
            event,
            summary,
            warning,
        })
    }

    /// Session state just before `at`, compared with the new action.
    fn check_sequence(
        history: &[Event],
        action: Action,
        at: &DateTime<FixedOffset>,
    ) -> Option<PunchWarning> {
        let end = history.partition_point(|e| e.timestamp <= *at);
        let open = open_session(&history[..end]);

        match (action, open) {
            (Action::ClockIn, Some(start)) => Some(PunchWarning::ReplacesOpenSession(start)),
            (Action::ClockOut, None) => Some(PunchWarning::NoOpenSession),
            _ => None,
        }
    }
}
