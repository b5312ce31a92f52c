//! punchclock library root.
//! Exposes the CLI parser, the high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use crate::core::clock::{Clock, FixedClock, SystemClock};
use errors::AppResult;
use models::action::Action;
use utils::date::{parse_timestamp, parse_tz};

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::In(args) => cli::commands::punch::handle(args, Action::ClockIn, cfg, clock),
        Commands::Out(args) => cli::commands::punch::handle(args, Action::ClockOut, cfg, clock),
        Commands::Status { .. } => cli::commands::status::handle(&cli.command, cfg, clock),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::People => cli::commands::people::handle(cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
    }
}

/// Apply the global command-line overrides on top of the loaded configuration.
pub fn apply_overrides(cli: &Cli, cfg: &mut Config) -> AppResult<()> {
    if let Some(kind) = cli.store
        && kind != cfg.store
    {
        cfg.store = kind;
        // the configured path belongs to the other backend
        cfg.database = Config::database_file(kind).to_string_lossy().to_string();
    }

    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_db_path(custom_db)
            .to_string_lossy()
            .to_string();
    }

    if let Some(tz) = &cli.tz {
        parse_tz(tz)?;
        cfg.timezone = tz.clone();
    }

    Ok(())
}

/// `--now` pins the clock; otherwise the system clock is used.
pub fn build_clock(cli: &Cli, cfg: &Config) -> AppResult<Box<dyn Clock>> {
    match &cli.now {
        Some(raw) => {
            let now = parse_timestamp(raw, &cfg.tz()?)?;
            tracing::debug!(%now, "using fixed clock");
            Ok(Box::new(FixedClock::new(now)))
        }
        None => Ok(Box::new(SystemClock)),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ diagnostics
    utils::logging::enable_logging(cli.verbose);

    // 3️⃣ load config ONCE, then apply overrides
    let mut cfg = Config::load()?;
    apply_overrides(&cli, &mut cfg)?;

    // 4️⃣ clock
    let clock = build_clock(&cli, &cfg)?;

    // 5️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg, clock.as_ref())
}
