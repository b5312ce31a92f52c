// src/export/logic.rs

use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::EventExport;
use crate::export::ExportFormat;
use crate::models::event::{Event, sort_chronologically};
use crate::store::LogStore;
use crate::ui::messages::warning;
use crate::utils::date::period_bounds;
use chrono::NaiveDate;
use chrono_tz::Tz;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export raw clock events.
    ///
    /// - `file`: absolute path of the output file
    /// - `person`: restrict to one person
    /// - `range`: `None`, `"all"` or `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `A:B`
    ///
    /// Returns the number of exported rows.
    pub fn export(
        store: &dyn LogStore,
        tz: Tz,
        format: ExportFormat,
        file: &str,
        person: Option<&str>,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(period_bounds(r).map_err(AppError::InvalidDate)?),
        };

        let mut events = match person {
            Some(p) => store.all_events_for(p)?,
            None => store.all_events()?,
        };
        sort_chronologically(&mut events);

        let rows = select_rows(&events, &tz, bounds);

        if rows.is_empty() {
            warning("No events found for selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        if let Err(e) = store.audit(
            "export",
            format.as_str(),
            &format!("{} events exported to {}", rows.len(), path.display()),
        ) {
            tracing::warn!(error = %e, "failed to write audit row");
        }

        Ok(rows.len())
    }
}

/// Events whose local date falls within `bounds` (inclusive).
pub(crate) fn select_rows(
    events: &[Event],
    tz: &Tz,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> Vec<EventExport> {
    events
        .iter()
        .filter(|ev| match bounds {
            Some((from, to)) => {
                let d = ev.local_date(tz);
                d >= from && d <= to
            }
            None => true,
        })
        .map(|ev| EventExport::from_event(ev, tz))
        .collect()
}
