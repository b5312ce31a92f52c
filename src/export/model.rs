// src/export/model.rs

use crate::models::event::Event;
use chrono::TimeZone;
use serde::Serialize;

/// Flat event row for CSV / JSON export.
#[derive(Serialize, Clone, Debug)]
pub struct EventExport {
    pub id: i64,
    pub person: String,
    pub role: String,
    pub action: String,
    pub timestamp: String,
    pub date: String,
    pub time: String,
}

impl EventExport {
    /// `date` and `time` are local to `tz`; `timestamp` keeps the stored offset.
    pub fn from_event<Tz: TimeZone>(ev: &Event, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let local = ev.timestamp.with_timezone(tz);
        Self {
            id: ev.id,
            person: ev.person.clone(),
            role: ev.role.clone(),
            action: ev.action.label().to_string(),
            timestamp: ev.timestamp.to_rfc3339(),
            date: local.format("%Y-%m-%d").to_string(),
            time: local.format("%H:%M:%S").to_string(),
        }
    }
}
