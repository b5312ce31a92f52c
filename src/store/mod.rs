//! Event storage. The calculator never talks to a store directly: callers
//! load a person's history, sort it, and hand the slice over.

pub mod csv_file;
pub mod sqlite;

use crate::config::Config;
use crate::errors::AppResult;
use crate::models::event::Event;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use csv_file::CsvStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Sqlite,
    Csv,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Sqlite => "sqlite",
            StoreKind::Csv => "csv",
        }
    }
}

/// Append-only log of clock events.
///
/// No ordering guarantee on reads.
pub trait LogStore {
    /// Persist one event and return the id assigned to it.
    /// Busy or locked backends fail with `AppError::StoreUnavailable`.
    fn append(&mut self, event: &Event) -> AppResult<i64>;

    fn all_events_for(&self, person: &str) -> AppResult<Vec<Event>>;

    fn all_events(&self) -> AppResult<Vec<Event>>;

    /// Distinct names present in the log, sorted.
    fn people(&self) -> AppResult<Vec<String>>;

    /// Record an audit line. Backends without an audit table only trace it.
    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        tracing::info!(operation, target, message, "audit");
        Ok(())
    }

    /// Create whatever the backend needs before the first append.
    fn init(&mut self) -> AppResult<()> {
        Ok(())
    }

    fn kind(&self) -> StoreKind;
}

/// Open the store described by the configuration.
/// Called once per process; the handle is passed to whoever needs it.
pub fn open_store(cfg: &Config) -> AppResult<Box<dyn LogStore>> {
    let tz = cfg.tz()?;
    let path = cfg.database_path();

    tracing::debug!(store = cfg.store.as_str(), path = %path.display(), "opening store");

    match cfg.store {
        StoreKind::Sqlite => Ok(Box::new(SqliteStore::open(&path.to_string_lossy())?)),
        StoreKind::Csv => Ok(Box::new(CsvStore::new(path, tz))),
    }
}
