use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use chrono_tz::Tz;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

pub fn parse_tz(name: &str) -> AppResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| AppError::InvalidTimezone(name.to_string()))
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse a timestamp: RFC3339 (offset kept) or a naive local date-time
/// interpreted in `tz`. Ambiguous local times (DST fold) take the earlier
/// instant; non-existent ones (DST gap) are rejected.
pub fn parse_timestamp<Z: TimeZone>(s: &str, tz: &Z) -> AppResult<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.fixed_offset())
                .ok_or_else(|| AppError::InvalidTime(format!("{s} does not exist in this timezone")));
        }
    }

    Err(AppError::InvalidTime(s.to_string()))
}

/// Drop sub-second precision: events are stored to the second.
pub fn truncate_to_seconds<Z: TimeZone>(dt: DateTime<Z>) -> DateTime<Z> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

pub fn generate_from_period(p: &str) -> Result<Vec<NaiveDate>, String> {
    // YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Ok(vec![d]);
    }

    // YYYY-MM
    if let Ok(dm) = NaiveDate::parse_from_str(&(p.to_string() + "-01"), "%Y-%m-%d") {
        return Ok(all_days_of_month(dm.year(), dm.month()));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
    {
        return Ok(all_days_of_year(year));
    }

    Err(format!("Invalid period: {}", p))
}

/// First and last day covered by a period (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`
/// or `A:B` with A and B in any of those forms).
pub fn period_bounds(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    let (start, end) = match p.split_once(':') {
        Some((a, b)) => (generate_from_period(a.trim())?, generate_from_period(b.trim())?),
        None => {
            let days = generate_from_period(p.trim())?;
            (days.clone(), days)
        }
    };

    match (start.first(), end.last()) {
        (Some(s), Some(e)) if s <= e => Ok((*s, *e)),
        _ => Err(format!("Invalid period: {}", p)),
    }
}

pub fn all_days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut next = NaiveDate::from_ymd_opt(year, month, 1);

    while let Some(d) = next {
        if d.month() != month {
            break;
        }
        out.push(d);
        next = d.succ_opt();
    }

    out
}

pub fn all_days_of_year(year: i32) -> Vec<NaiveDate> {
    let mut v = Vec::new();
    let mut next = NaiveDate::from_ymd_opt(year, 1, 1);

    while let Some(d) = next {
        if d.year() != year {
            break;
        }
        v.push(d);
        next = d.succ_opt();
    }

    v
}
