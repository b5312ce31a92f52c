mod common;
use common::{clock_in, clock_out, setup_test_db, ts};

use chrono_tz::Tz;
use punchclock::core::calculator::hours::total_hours;
use punchclock::errors::AppError;
use punchclock::models::action::Action;
use punchclock::store::{CsvStore, LogStore, SqliteStore, StoreKind};
use std::fs;
use std::io;

#[test]
fn test_sqlite_append_and_read_back() {
    let mut store = SqliteStore::in_memory().expect("open in-memory store");

    let id1 = store
        .append(&clock_in("Suchi", "2024-01-01T09:00:00+01:00"))
        .expect("append in");
    let id2 = store
        .append(&clock_out("Suchi", "2024-01-01T17:00:00+01:00").with_snapshot(8.0, 8.0))
        .expect("append out");
    store
        .append(&clock_in("Dharshine", "2024-01-01T10:00:00+01:00"))
        .expect("append other");

    assert!(id2 > id1);

    let events = store.all_events_for("Suchi").expect("load");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].action, Action::ClockIn);
    assert_eq!(events[0].timestamp, ts("2024-01-01T09:00:00+01:00"));
    assert_eq!(events[0].today_hours, None);
    assert_eq!(events[1].today_hours, Some(8.0));
    assert_eq!(events[1].role, "Intern");

    assert_eq!(store.all_events().expect("all").len(), 3);
    assert_eq!(
        store.people().expect("people"),
        vec!["Dharshine".to_string(), "Suchi".to_string()]
    );
    assert_eq!(store.kind(), StoreKind::Sqlite);
}

#[test]
fn test_sqlite_migrations_are_idempotent() {
    let db_path = setup_test_db("store_migrations", "sqlite");

    {
        let mut store = SqliteStore::open(&db_path).expect("first open");
        store
            .append(&clock_in("Suchi", "2024-01-01T09:00:00+00:00"))
            .expect("append");
    }

    // second open must not re-apply anything or lose data
    let store = SqliteStore::open(&db_path).expect("second open");
    assert_eq!(store.all_events_for("Suchi").expect("load").len(), 1);

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let applied: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |row| row.get(0),
        )
        .expect("count");
    assert_eq!(applied, 1);
}

#[test]
fn test_csv_store_writes_header_and_rows() {
    let path = setup_test_db("store_csv_rows", "csv");
    let mut store = CsvStore::new(&path, Tz::UTC);

    store.init().expect("init");
    store
        .append(&clock_in("Suchi", "2024-01-01T09:00:00+00:00"))
        .expect("append in");
    let id = store
        .append(&clock_out("Suchi", "2024-01-01T17:00:00+00:00").with_snapshot(8.0, 8.0))
        .expect("append out");
    assert_eq!(id, 2);

    let content = fs::read_to_string(&path).expect("read csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("Name,Role,Action,Timestamp,Today Hours,Week Hours")
    );
    assert!(content.contains("Suchi,Intern,Clock In,2024-01-01T09:00:00+00:00,,"));
    assert!(content.contains("Clock Out,2024-01-01T17:00:00+00:00,8.00,8.00"));

    let events = store.all_events_for("Suchi").expect("load");
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].week_hours, Some(8.0));
}

#[test]
fn test_csv_store_reads_loose_headers_and_naive_timestamps() {
    let path = setup_test_db("store_csv_loose", "csv");
    fs::write(
        &path,
        " name , ROLE ,action,timestamp\n\
         Suchi,Intern,Clock In,2024-01-01 09:00:00\n\
         Suchi,Intern,clock_out,2024-01-01 17:00:00\n\
         Suchi,Intern,Lunch,2024-01-01 12:00:00\n\
         ,Intern,Clock In,2024-01-01 12:00:00\n",
    )
    .expect("write csv");

    let rome: Tz = "Europe/Rome".parse().expect("known zone");
    let store = CsvStore::new(&path, rome);

    // bad action and empty name rows are skipped
    let events = store.all_events().expect("load");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].timestamp, ts("2024-01-01T09:00:00+01:00"));
    assert_eq!(events[1].action, Action::ClockOut);
}

#[test]
fn test_csv_store_missing_file_is_empty() {
    let path = setup_test_db("store_csv_missing", "csv");
    let store = CsvStore::new(&path, Tz::UTC);
    assert!(store.all_events().expect("load").is_empty());
    assert!(store.people().expect("people").is_empty());
}

#[test]
fn test_locked_store_is_reported_as_unavailable() {
    let io_err = AppError::from_store_io(io::Error::from(io::ErrorKind::PermissionDenied));
    assert!(io_err.is_store_unavailable());
    assert!(io_err.to_string().contains("please retry"));

    let not_found = AppError::from_store_io(io::Error::from(io::ErrorKind::NotFound));
    assert!(!not_found.is_store_unavailable());

    let busy = rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
        Some("database is locked".to_string()),
    );
    assert!(AppError::from_sqlite(busy).is_store_unavailable());

    let other = rusqlite::Error::QueryReturnedNoRows;
    assert!(!AppError::from_sqlite(other).is_store_unavailable());
}

#[test]
fn test_csv_append_follows_existing_column_order() {
    let path = setup_test_db("store_csv_reordered", "csv");
    fs::write(
        &path,
        "Timestamp,Action,Name,Role\n\
         2024-01-01T09:00:00+00:00,Clock In,Suchi,Intern\n",
    )
    .expect("write csv");

    let mut store = CsvStore::new(&path, Tz::UTC);
    let id = store
        .append(&clock_out("Suchi", "2024-01-01T17:00:00+00:00").with_snapshot(8.0, 8.0))
        .expect("append out");
    assert_eq!(id, 2);

    let content = fs::read_to_string(&path).expect("read csv");
    assert!(content.ends_with("2024-01-01T17:00:00+00:00,Clock Out,Suchi,Intern\n"));

    let events = store.all_events_for("Suchi").expect("load");
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].id, id);
    assert_eq!(total_hours(&events), 8.0);
}

#[test]
fn test_csv_append_after_row_without_trailing_newline() {
    let path = setup_test_db("store_csv_no_newline", "csv");
    fs::write(
        &path,
        "Name,Role,Action,Timestamp,Today Hours,Week Hours\n\
         Suchi,Intern,Clock In,2024-01-01 09:00:00,0,0",
    )
    .expect("write csv");

    let mut store = CsvStore::new(&path, Tz::UTC);
    store
        .append(&clock_out("Suchi", "2024-01-01T17:00:00+00:00"))
        .expect("append out");

    let content = fs::read_to_string(&path).expect("read csv");
    assert!(content.contains("2024-01-01 09:00:00,0,0\nSuchi,Intern,Clock Out"));

    let events = store.all_events_for("Suchi").expect("load");
    assert_eq!(events.len(), 2);
    assert_eq!(total_hours(&events), 8.0);
}

#[test]
fn test_csv_append_id_counts_malformed_rows() {
    let path = setup_test_db("store_csv_malformed_id", "csv");
    fs::write(
        &path,
        "Name,Role,Action,Timestamp\n\
         Suchi,Intern,Lunch,2024-01-01 12:00:00\n",
    )
    .expect("write csv");

    let mut store = CsvStore::new(&path, Tz::UTC);
    let id = store
        .append(&clock_in("Suchi", "2024-01-01T13:00:00+00:00"))
        .expect("append in");
    assert_eq!(id, 2);

    let events = store.all_events().expect("load");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, id);
}

#[test]
fn test_csv_blank_file_gets_a_header() {
    let path = setup_test_db("store_csv_blank", "csv");
    fs::write(&path, "\n\n").expect("write csv");

    let mut store = CsvStore::new(&path, Tz::UTC);
    assert!(store.all_events().expect("load").is_empty());

    let id = store
        .append(&clock_in("Suchi", "2024-01-01T09:00:00+00:00"))
        .expect("append in");
    assert_eq!(id, 1);

    let content = fs::read_to_string(&path).expect("read csv");
    assert!(content.starts_with("Name,Role,Action,Timestamp,Today Hours,Week Hours\n"));
    assert_eq!(store.all_events().expect("load").len(), 1);
}

#[test]
fn test_locked_sqlite_is_unavailable_on_open_and_read() {
    let db_path = setup_test_db("store_sqlite_locked", "sqlite");

    let mut store = SqliteStore::open(&db_path).expect("first open");
    store
        .append(&clock_in("Suchi", "2024-01-01T09:00:00+00:00"))
        .expect("append");

    let holder = rusqlite::Connection::open(&db_path).expect("second connection");
    holder
        .execute_batch("BEGIN EXCLUSIVE;")
        .expect("take exclusive lock");

    let err = match SqliteStore::open(&db_path) {
        Ok(_) => panic!("open must fail while the database is locked"),
        Err(e) => e,
    };
    assert!(err.is_store_unavailable(), "got {err:?}");
    assert!(err.to_string().contains("please retry"));

    let err = store.all_events_for("Suchi").expect_err("read must fail");
    assert!(err.is_store_unavailable(), "got {err:?}");

    let err = store
        .append(&clock_out("Suchi", "2024-01-01T17:00:00+00:00"))
        .expect_err("append must fail");
    assert!(err.is_store_unavailable(), "got {err:?}");

    holder.execute_batch("ROLLBACK;").expect("release lock");
    assert_eq!(store.all_events_for("Suchi").expect("load").len(), 1);
}
