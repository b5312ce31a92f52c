use crate::cli::parser::PunchArgs;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::punch::{PunchLogic, PunchWarning};
use crate::errors::AppResult;
use crate::models::action::Action;
use crate::store::open_store;
use crate::ui::messages::{success, warning};
use crate::utils::colors::colorize_hours;
use crate::utils::date::parse_timestamp;
use crate::utils::hours2str;

/// Clock in or out.
pub fn handle(args: &PunchArgs, action: Action, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let tz = cfg.tz()?;

    //
    // 1. Parse --at (optional)
    //
    let at = match &args.at {
        Some(raw) => Some(parse_timestamp(raw, &tz)?),
        None => None,
    };

    //
    // 2. Resolve role
    //
    let role = cfg.role_or_default(args.role.as_deref());

    //
    // 3. Open store and record
    //
    let mut store = open_store(cfg)?;
    let outcome = PunchLogic::record(store.as_mut(), clock, tz, &args.name, &role, action, at)?;

    match &outcome.warning {
        Some(PunchWarning::ReplacesOpenSession(start)) => warning(format!(
            "{} was already clocked in since {}: that session is discarded.",
            outcome.event.person,
            start.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S")
        )),
        Some(PunchWarning::NoOpenSession) => warning(format!(
            "{} was not clocked in: this clock-out adds no hours.",
            outcome.event.person
        )),
        None => {}
    }

    success(format!(
        "{} recorded for {} ({}) at {}",
        action.label(),
        outcome.event.person,
        outcome.event.role,
        outcome.event.local_stamp(&tz)
    ));

    let today = hours2str(outcome.summary.today);
    let week = hours2str(outcome.summary.week);
    println!("📅 Total Hours Today: {}", colorize_hours(&today, outcome.summary.today));
    println!("📈 Total Hours This Week: {}", colorize_hours(&week, outcome.summary.week));

    Ok(())
}
