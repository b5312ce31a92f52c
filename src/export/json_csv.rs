// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::{EventExport, notify_export_success};
use crate::ui::messages::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Pretty-printed JSON array, one object per event.
pub(crate) fn export_json(rows: &[EventExport], path: &Path) -> AppResult<()> {
    info(format!("Writing {} events as JSON to {}", rows.len(), path.display()));

    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, rows)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;
    out.flush()?;

    notify_export_success("JSON", path, rows.len());
    Ok(())
}

/// CSV with the header taken from the `EventExport` field names.
pub(crate) fn export_csv(rows: &[EventExport], path: &Path) -> AppResult<()> {
    info(format!("Writing {} events as CSV to {}", rows.len(), path.display()));

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("cannot create {}: {e}", path.display())))?;

    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    notify_export_success("CSV", path, rows.len());
    Ok(())
}
