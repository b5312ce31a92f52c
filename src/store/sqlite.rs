use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_event, list_people, load_all_events, load_events_for_person};
use crate::errors::AppResult;
use crate::models::event::Event;
use crate::store::{LogStore, StoreKind};

/// SQLite-backed event log.
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Open (or create) the database file and bring the schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn pool(&mut self) -> &mut DbPool {
        &mut self.pool
    }
}

impl LogStore for SqliteStore {
    fn append(&mut self, event: &Event) -> AppResult<i64> {
        let id = insert_event(&self.pool.conn, event)?;
        tracing::debug!(id, person = %event.person, action = event.action.to_db_str(), "event stored");
        Ok(id)
    }

    fn all_events_for(&self, person: &str) -> AppResult<Vec<Event>> {
        load_events_for_person(&self.pool.conn, person)
    }

    fn all_events(&self) -> AppResult<Vec<Event>> {
        load_all_events(&self.pool.conn)
    }

    fn people(&self) -> AppResult<Vec<String>> {
        list_people(&self.pool.conn)
    }

    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(&self.pool.conn, operation, target, message)
    }

    fn kind(&self) -> StoreKind {
        StoreKind::Sqlite
    }
}
