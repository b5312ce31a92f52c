use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;
use crate::store::{SqliteStore, StoreKind};
use crate::ui::messages::warning;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        if cfg.store != StoreKind::Sqlite {
            warning("The internal log is only kept by the sqlite store.");
            return Ok(());
        }

        let mut store = SqliteStore::open(&cfg.database_path().to_string_lossy())?;
        LogLogic::print_log(store.pool())?;
    }

    Ok(())
}
