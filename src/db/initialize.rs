use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine.
/// A busy or locked database stays `StoreUnavailable`, anything else is a migration failure.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn).map_err(|e| match AppError::from_sqlite(e) {
        AppError::Db(e) => AppError::Migration(e.to_string()),
        unavailable => unavailable,
    })
}
