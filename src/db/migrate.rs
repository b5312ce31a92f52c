use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
/// It doubles as the migration ledger (`operation = 'migration_applied'`).
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `events` table exists.
fn events_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='events'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if the `events` table has the given column.
fn events_has_column(conn: &Connection, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('events')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the base `events` table: one immutable row per clock action.
fn create_events_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            person      TEXT NOT NULL,
            role        TEXT NOT NULL DEFAULT '',
            action      TEXT NOT NULL CHECK(action IN ('in','out')),
            timestamp   TEXT NOT NULL,
            source      TEXT NOT NULL DEFAULT 'cli',
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_events_person ON events(person);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Add the totals snapshot columns shown next to each event.
fn migrate_add_hours_snapshot(conn: &Connection) -> Result<()> {
    let version = "20250301_0001_add_hours_snapshot";

    // 1) Already applied?
    if migration_applied(conn, version)? {
        return Ok(());
    }

    // 2) Columns may exist if the table was created by hand
    if !events_has_column(conn, "today_hours")? {
        conn.execute("ALTER TABLE events ADD COLUMN today_hours REAL", [])?;
    }
    if !events_has_column(conn, "week_hours")? {
        conn.execute("ALTER TABLE events ADD COLUMN week_hours REAL", [])?;
    }

    // 3) Mark as applied
    mark_applied(conn, version, "Added today_hours/week_hours snapshot to events")?;

    success(format!(
        "Migration applied: {} → added hours snapshot to events table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called by db::initialize::init_db() and every time the SQLite store opens.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ledger first
    ensure_log_table(conn)?;

    // 2) Base schema
    if !events_table_exists(conn)? {
        create_events_table(conn)?;
        tracing::info!("created events table");
    }

    // 3) Incremental migrations
    migrate_add_hours_snapshot(conn)?;

    Ok(())
}
