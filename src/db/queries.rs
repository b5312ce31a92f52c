use crate::errors::{AppError, AppResult};
use crate::models::action::Action;
use crate::models::event::Event;
use chrono::{DateTime, Local};
use rusqlite::{Connection, Result, Row, params};

const EVENT_COLUMNS: &str =
    "id, person, role, action, timestamp, today_hours, week_hours, source";

pub fn map_row(row: &Row) -> Result<Event> {
    let ts_str: String = row.get("timestamp")?;
    let timestamp = DateTime::parse_from_rfc3339(&ts_str).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(ts_str.clone())),
        )
    })?;

    let action_str: String = row.get("action")?;
    let action = Action::from_db_str(&action_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidAction(action_str.clone())),
        )
    })?;

    Ok(Event {
        id: row.get("id")?,
        person: row.get("person")?,
        role: row.get("role")?,
        action,
        timestamp,
        today_hours: row.get("today_hours")?,
        week_hours: row.get("week_hours")?,
        source: row.get("source")?,
    })
}

/// Insert a new event and return its id. Events are never updated afterwards.
pub fn insert_event(conn: &Connection, ev: &Event) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO events (person, role, action, timestamp, today_hours, week_hours, source, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            ev.person,
            ev.role,
            ev.action.to_db_str(),
            ev.timestamp.to_rfc3339(),
            ev.today_hours,
            ev.week_hours,
            ev.source,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All events for one person, in insertion order.
/// Insertion order is not chronological when `--at` backdates: callers sort.
pub fn load_events_for_person(conn: &Connection, person: &str) -> AppResult<Vec<Event>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE person = ?1 ORDER BY id ASC"
    ))?;

    let rows = stmt.query_map([person], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_all_events(conn: &Connection) -> AppResult<Vec<Event>> {
    let mut stmt = conn.prepare(&format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY id ASC"))?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Distinct person names, alphabetically.
pub fn list_people(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT DISTINCT person FROM events ORDER BY person ASC")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
