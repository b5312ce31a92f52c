use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::store::open_store;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        name,
        range,
        force,
    } = cmd
    {
        let store = open_store(cfg)?;
        ExportLogic::export(
            store.as_ref(),
            cfg.tz()?,
            *format,
            file,
            name.as_deref(),
            range.as_deref(),
            *force,
        )?;
    }

    Ok(())
}
