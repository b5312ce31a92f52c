use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::store::open_store;
use crate::ui::messages::header;
use crate::utils::colors::{colorize_hours, colorize_open};
use crate::utils::formatting::{hours2readable, hours2str};

pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Status { name } = cmd {
        let tz = cfg.tz()?;
        let store = open_store(cfg)?;

        let summary = ReportLogic::summary(store.as_ref(), clock, tz, name.trim())?;

        header(format!("Hello, {} 👋", summary.person));

        let today = hours2str(summary.today);
        let week = hours2str(summary.week);
        println!(
            "📅 Total Hours Today: {} ({})",
            colorize_hours(&today, summary.today),
            hours2readable(summary.today)
        );
        println!(
            "📈 Total Hours This Week: {} ({})",
            colorize_hours(&week, summary.week),
            hours2readable(summary.week)
        );

        if let Some(since) = summary.open_since {
            let label = format!(
                "Clocked in since {} (not counted until clock-out)",
                since.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S")
            );
            println!("⏱️  {}", colorize_open(&label));
        }
    }

    Ok(())
}
