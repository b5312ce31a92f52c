//! Unified application error type.
//! All modules (store, core, cli, config, export) return AppError to keep
//! the error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Store-related
    // ---------------------------
    /// Built through `From`, which sends busy/locked failures to `StoreUnavailable`.
    #[error("Database error: {0}")]
    Db(rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    /// The backing store is busy, locked or otherwise not reachable right now.
    /// Never retried here: the caller decides how to surface it.
    #[error("Store unavailable: {0} (please retry)")]
    StoreUnavailable(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("A person name is required")]
    MissingPerson,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(String),

    #[error("Failed to save configuration: {0}")]
    ConfigSave(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Classify a SQLite failure: busy/locked databases become `StoreUnavailable`.
    pub fn from_sqlite(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if matches!(
                    e.code,
                    rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
                ) =>
            {
                AppError::StoreUnavailable(err.to_string())
            }
            _ => AppError::Db(err),
        }
    }

    /// Classify an I/O failure on the flat-file store.
    pub fn from_store_io(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied | io::ErrorKind::WouldBlock => {
                AppError::StoreUnavailable(format!(
                    "file is locked by another program ({err})"
                ))
            }
            _ => AppError::Io(err),
        }
    }

    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, AppError::StoreUnavailable(_))
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::from_sqlite(err)
    }
}

pub type AppResult<T> = Result<T, AppError>;
