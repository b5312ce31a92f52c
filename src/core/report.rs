use crate::core::calculator::hours::{hours_for_day, hours_for_week, open_session, total_hours};
use crate::core::calculator::sessions::{Session, build_sessions};
use crate::core::clock::Clock;
use crate::errors::AppResult;
use crate::models::event::{Event, sort_chronologically};
use crate::models::summary::HoursSummary;
use crate::store::LogStore;
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use std::collections::BTreeMap;

/// Sessions and total for one calendar day.
#[derive(Debug, Clone)]
pub struct DayReport {
    pub date: NaiveDate,
    pub events: Vec<Event>,
    pub sessions: Vec<Session>,
    pub hours: f64,
}

/// Today/week totals for `person` as of `now`. Snapshots stored on the
/// events are ignored: everything is recomputed from the raw actions.
pub fn summarize(events: &[Event], person: &str, now: &DateTime<Tz>, tz: &Tz) -> HoursSummary {
    let mut own: Vec<Event> = events.iter().filter(|e| e.person == person).cloned().collect();
    sort_chronologically(&mut own);

    HoursSummary {
        person: person.to_string(),
        today: hours_for_day(&own, person, now.date_naive(), tz),
        week: hours_for_week(&own, person, now, tz),
        open_since: open_session(&own),
    }
}

/// Group a person's events by local calendar day within `[from, to]`.
pub fn daily_reports(
    events: &[Event],
    person: &str,
    tz: &Tz,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> Vec<DayReport> {
    let mut by_day: BTreeMap<NaiveDate, Vec<Event>> = BTreeMap::new();

    for ev in events.iter().filter(|e| e.person == person) {
        let day = ev.local_date(tz);
        if let Some((from, to)) = bounds
            && (day < from || day > to)
        {
            continue;
        }
        by_day.entry(day).or_default().push(ev.clone());
    }

    by_day
        .into_iter()
        .map(|(date, mut day_events)| {
            sort_chronologically(&mut day_events);
            DayReport {
                date,
                sessions: build_sessions(&day_events),
                hours: total_hours(&day_events),
                events: day_events,
            }
        })
        .collect()
}

pub struct ReportLogic;

impl ReportLogic {
    pub fn summary(
        store: &dyn LogStore,
        clock: &dyn Clock,
        tz: Tz,
        person: &str,
    ) -> AppResult<HoursSummary> {
        let events = store.all_events_for(person)?;
        let now = clock.now(tz);
        tracing::debug!(person, events = events.len(), %now, "computing summary");
        Ok(summarize(&events, person, &now, &tz))
    }

    pub fn days(
        store: &dyn LogStore,
        tz: Tz,
        person: &str,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<Vec<DayReport>> {
        let events = store.all_events_for(person)?;
        Ok(daily_reports(&events, person, &tz, bounds))
    }
}
