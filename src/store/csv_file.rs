//! Flat-file event log: one CSV row per clock action, append only.
//!
//! Header: `Name,Role,Action,Timestamp,Today Hours,Week Hours`.
//! Timestamps are written as RFC3339; naive `YYYY-MM-DD HH:MM:SS` values
//! written by older tools are read in the store's timezone.

use crate::errors::{AppError, AppResult};
use crate::models::action::Action;
use crate::models::event::Event;
use crate::store::{LogStore, StoreKind};
use crate::utils::date::parse_timestamp;
use chrono_tz::Tz;
use std::collections::BTreeSet;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

pub const HEADER: [&str; 6] = [
    "Name",
    "Role",
    "Action",
    "Timestamp",
    "Today Hours",
    "Week Hours",
];

pub struct CsvStore {
    path: PathBuf,
    tz: Tz,
}

/// Column positions resolved from the header row.
struct Columns {
    name: usize,
    role: Option<usize>,
    action: usize,
    timestamp: usize,
    today: Option<usize>,
    week: Option<usize>,
}

impl Columns {
    /// Positions in `HEADER`.
    fn standard() -> Self {
        Self {
            name: 0,
            role: Some(1),
            action: 2,
            timestamp: 3,
            today: Some(4),
            week: Some(5),
        }
    }

    fn resolve(headers: &csv::StringRecord) -> AppResult<Self> {
        let find = |wanted: &[&str]| {
            headers
                .iter()
                .position(|h| wanted.contains(&normalize_header(h).as_str()))
        };

        let missing = |col: &str| AppError::Other(format!("CSV log has no '{col}' column"));

        Ok(Self {
            name: find(&["name", "person"]).ok_or_else(|| missing("Name"))?,
            role: find(&["role"]),
            action: find(&["action"]).ok_or_else(|| missing("Action"))?,
            timestamp: find(&["timestamp", "time"]).ok_or_else(|| missing("Timestamp"))?,
            today: find(&["todayhours", "today"]),
            week: find(&["weekhours", "week"]),
        })
    }
}

/// Shape of a file that already has a header, read before appending to it.
struct Layout {
    columns: Columns,
    width: usize,
    /// Data records, malformed ones included: the next id is `rows + 1`.
    rows: i64,
}

/// `" Today Hours "` → `"todayhours"`.
fn normalize_header(h: &str) -> String {
    h.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// True when the last byte is not `\n`, so the next row would be glued onto it.
fn missing_final_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

/// Resolved columns and header width. `None` for a blank file; a blank
/// header followed by rows is an error like any other unusable header.
fn header_columns(rdr: &mut csv::Reader<File>) -> AppResult<Option<(Columns, usize)>> {
    let headers = rdr.headers().map_err(csv_error)?.clone();
    if headers.iter().all(str::is_empty) && rdr.records().next().is_none() {
        return Ok(None);
    }
    Ok(Some((Columns::resolve(&headers)?, headers.len())))
}

fn csv_error(err: csv::Error) -> AppError {
    let locked = matches!(
        err.kind(),
        csv::ErrorKind::Io(io) if matches!(io.kind(), io::ErrorKind::PermissionDenied | io::ErrorKind::WouldBlock)
    );

    if locked {
        AppError::StoreUnavailable(format!("file is locked by another program ({err})"))
    } else {
        AppError::Csv(err)
    }
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>, tz: Tz) -> Self {
        Self {
            path: path.into(),
            tz,
        }
    }

    fn reader(&self) -> AppResult<csv::Reader<File>> {
        let file = File::open(&self.path).map_err(AppError::from_store_io)?;
        Ok(csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file))
    }

    /// `None` when there is no header yet (missing or blank file).
    fn layout(&self) -> AppResult<Option<Layout>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let mut rdr = self.reader()?;
        let Some((columns, width)) = header_columns(&mut rdr)? else {
            return Ok(None);
        };

        let mut rows = 0;
        for rec in rdr.records() {
            rec.map_err(csv_error)?;
            rows += 1;
        }

        Ok(Some(Layout {
            columns,
            width,
            rows,
        }))
    }

    fn read_all(&self) -> AppResult<Vec<Event>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut rdr = self.reader()?;
        let Some((cols, _)) = header_columns(&mut rdr)? else {
            return Ok(Vec::new());
        };

        let mut out = Vec::new();
        for (idx, rec) in rdr.records().enumerate() {
            let rec = rec.map_err(csv_error)?;
            let line = idx + 2;

            match self.parse_record(&rec, &cols, idx as i64 + 1) {
                Some(ev) => out.push(ev),
                None => tracing::warn!(line, path = %self.path.display(), "skipping malformed row"),
            }
        }

        Ok(out)
    }

    fn parse_record(&self, rec: &csv::StringRecord, cols: &Columns, id: i64) -> Option<Event> {
        let person = rec.get(cols.name)?.to_string();
        if person.is_empty() {
            return None;
        }

        let action = Action::parse(rec.get(cols.action)?)?;
        let timestamp = parse_timestamp(rec.get(cols.timestamp)?, &self.tz).ok()?;
        let role = cols
            .role
            .and_then(|i| rec.get(i))
            .unwrap_or_default()
            .to_string();

        let hours = |col: Option<usize>| col.and_then(|i| rec.get(i)).and_then(|v| v.parse().ok());

        Some(Event {
            id,
            person,
            role,
            action,
            timestamp,
            today_hours: hours(cols.today),
            week_hours: hours(cols.week),
            source: "csv".to_string(),
        })
    }
}

impl LogStore for CsvStore {
    /// Rows follow the column order of the existing header; columns this
    /// store does not know are left empty.
    fn append(&mut self, event: &Event) -> AppResult<i64> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(AppError::from_store_io)?;

        let layout = self.layout()?;

        if layout.is_none() {
            // nothing but blank lines: start over with a clean header
            file.set_len(0).map_err(AppError::from_store_io)?;
        } else if missing_final_newline(&mut file).map_err(AppError::from_store_io)? {
            file.write_all(b"\n").map_err(AppError::from_store_io)?;
        }

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        let Layout {
            columns,
            width,
            rows,
        } = match layout {
            Some(layout) => layout,
            None => {
                wtr.write_record(HEADER).map_err(csv_error)?;
                Layout {
                    columns: Columns::standard(),
                    width: HEADER.len(),
                    rows: 0,
                }
            }
        };

        let fmt_hours = |h: Option<f64>| h.map(|v| format!("{v:.2}")).unwrap_or_default();

        let mut row = vec![String::new(); width];
        row[columns.name] = event.person.clone();
        row[columns.action] = event.action.label().to_string();
        row[columns.timestamp] = event.timestamp.to_rfc3339();
        if let Some(i) = columns.role {
            row[i] = event.role.clone();
        }
        if let Some(i) = columns.today {
            row[i] = fmt_hours(event.today_hours);
        }
        if let Some(i) = columns.week {
            row[i] = fmt_hours(event.week_hours);
        }

        wtr.write_record(&row).map_err(csv_error)?;
        wtr.flush().map_err(AppError::from_store_io)?;

        // ids are 1-based row numbers
        let id = rows + 1;
        tracing::debug!(id, path = %self.path.display(), "row appended");
        Ok(id)
    }

    fn all_events_for(&self, person: &str) -> AppResult<Vec<Event>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|e| e.person == person)
            .collect())
    }

    fn all_events(&self) -> AppResult<Vec<Event>> {
        self.read_all()
    }

    fn people(&self) -> AppResult<Vec<String>> {
        let names: BTreeSet<String> = self.read_all()?.into_iter().map(|e| e.person).collect();
        Ok(names.into_iter().collect())
    }

    /// Create the file with just the header row, if missing.
    fn init(&mut self) -> AppResult<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let mut wtr = csv::Writer::from_path(&self.path).map_err(csv_error)?;
        wtr.write_record(HEADER).map_err(csv_error)?;
        wtr.flush().map_err(AppError::from_store_io)?;
        Ok(())
    }

    fn kind(&self) -> StoreKind {
        StoreKind::Csv
    }
}
