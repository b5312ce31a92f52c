use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::open_store;
use crate::ui::messages::warning;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the event store (SQLite schema + migrations, or the CSV header)
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    //
    // 1️⃣ CONFIGURATION
    //
    let new_cfg = Config::init_all(cli.db.as_deref(), cfg, cli.test)?;

    println!("⚙️  Initializing punchclock…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Store      : {} ({})", new_cfg.database, new_cfg.store.as_str());
    println!("🌍 Timezone   : {}", new_cfg.timezone);

    //
    // 2️⃣ STORE
    //
    let mut store = open_store(&new_cfg)?;
    store.init()?;

    println!("✅ Store initialized at {}", new_cfg.database);

    //
    // 3️⃣ AUDIT (non blocking)
    //
    if let Err(e) = store.audit(
        "init",
        new_cfg.store.as_str(),
        &format!("Store initialized at {}", new_cfg.database),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    println!("🎉 punchclock initialization completed!");
    Ok(())
}
