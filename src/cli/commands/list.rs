use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::{DayReport, ReportLogic};
use crate::errors::{AppError, AppResult};
use crate::store::open_store;
use crate::utils::colors::{colorize_action, colorize_hours, colorize_open};
use crate::utils::date::period_bounds;
use crate::utils::formatting::{bold, hours2str};
use crate::utils::table::Table;
use chrono::NaiveDate;
use chrono_tz::Tz;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        name,
        period,
        events: events_only,
    } = cmd
    {
        let tz = cfg.tz()?;
        let store = open_store(cfg)?;

        let bounds = resolve_period(period.as_deref())?;
        let days = ReportLogic::days(store.as_ref(), tz, name.trim(), bounds)?;

        if days.is_empty() {
            println!("No events for {}.", name.trim());
            return Ok(());
        }

        let mut grand_total = 0.0;
        for day in &days {
            if *events_only {
                print_events(day, &tz, cfg.separator());
            } else {
                print_sessions(day, &tz, cfg.separator());
            }
            grand_total += day.hours;
        }

        if !*events_only {
            let total = hours2str(grand_total);
            println!(
                "\n{} {}",
                bold("Total:"),
                colorize_hours(&format!("{total} h"), grand_total)
            );
        }
    }
    Ok(())
}

/// `None` or `"all"` → no filter.
fn resolve_period(period: Option<&str>) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    match period {
        None => Ok(None),
        Some(p) if p.eq_ignore_ascii_case("all") => Ok(None),
        Some(p) => period_bounds(p).map(Some).map_err(AppError::InvalidDate),
    }
}

fn day_title(day: &DayReport) -> String {
    format!("=== {} ({}) ===", day.date, day.date.format("%A"))
}

fn print_events(day: &DayReport, tz: &Tz, sep: char) {
    println!("\n{}", day_title(day));

    let mut table = Table::new(["ID", "TIME", "ACTION", "ROLE"]);
    for ev in &day.events {
        table.add_row(vec![
            ev.id.to_string(),
            ev.timestamp.with_timezone(tz).format("%H:%M:%S").to_string(),
            colorize_action(ev.action.label(), ev.action.is_in()),
            ev.role.clone(),
        ]);
    }
    print!("{}", table.render(sep));
}

fn print_sessions(day: &DayReport, tz: &Tz, sep: char) {
    println!("\n{}", day_title(day));

    if day.sessions.is_empty() {
        println!("No valid sessions.");
        return;
    }

    let mut table = Table::new(["#", "ROLE", "IN", "OUT", "HOURS"]);
    for (i, s) in day.sessions.iter().enumerate() {
        let start = s.start.with_timezone(tz).format("%H:%M:%S").to_string();
        let end = match s.end {
            Some(end) => end.with_timezone(tz).format("%H:%M:%S").to_string(),
            None => colorize_open("open"),
        };
        table.add_row(vec![
            (i + 1).to_string(),
            s.role.clone(),
            start,
            end,
            colorize_hours(&hours2str(s.hours), s.hours),
        ]);
    }
    print!("{}", table.render(sep));
    println!("Day total: {} h", hours2str(day.hours));
}
