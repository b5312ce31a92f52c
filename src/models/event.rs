use super::action::Action;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Event {
    pub id: i64,                           // ⇔ events.id (0 until stored)
    pub person: String,                    // ⇔ events.person
    pub role: String,                      // ⇔ events.role (free text, never aggregated)
    pub action: Action,                    // ⇔ events.action ('in' | 'out')
    pub timestamp: DateTime<FixedOffset>,  // ⇔ events.timestamp (TEXT, RFC3339)
    pub today_hours: Option<f64>,          // ⇔ events.today_hours (display snapshot)
    pub week_hours: Option<f64>,           // ⇔ events.week_hours (display snapshot)
    pub source: String,                    // ⇔ events.source (TEXT, default 'cli')
}

impl Event {
    /// Build a not-yet-stored event.
    /// - `id = 0` (assigned by the store)
    /// - no totals snapshot
    /// - `source = "cli"`
    pub fn new(
        person: impl Into<String>,
        role: impl Into<String>,
        action: Action,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            id: 0,
            person: person.into(),
            role: role.into(),
            action,
            timestamp,
            today_hours: None,
            week_hours: None,
            source: "cli".to_string(),
        }
    }

    /// Attach the totals snapshot shown next to the event.
    /// Never read back by the calculator.
    pub fn with_snapshot(mut self, today: f64, week: f64) -> Self {
        self.today_hours = Some(today);
        self.week_hours = Some(week);
        self
    }

    /// Calendar date of the event as seen in `tz`.
    pub fn local_date<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.timestamp.with_timezone(tz).date_naive()
    }

    /// `YYYY-MM-DD HH:MM:SS` in `tz`, the format used in listings and the flat file.
    pub fn local_stamp<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        self.timestamp
            .with_timezone(tz)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}

/// Sort events ascending by timestamp. Stable, so same-second events keep
/// the order the store returned them in.
pub fn sort_chronologically(events: &mut [Event]) {
    events.sort_by_key(|e| e.timestamp);
}
