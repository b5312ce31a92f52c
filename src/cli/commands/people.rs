use crate::config::Config;
use crate::errors::AppResult;
use crate::store::open_store;
use std::collections::BTreeSet;

/// Names from the config plus everyone who ever punched.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let store = open_store(cfg)?;

    let mut names: BTreeSet<String> = cfg.people.iter().cloned().collect();
    names.extend(store.people()?);

    if names.is_empty() {
        println!("No people yet. Clock in with `punchclock in <name>`.");
        return Ok(());
    }

    println!("👥 People:");
    for n in names {
        println!("- {}", n);
    }
    Ok(())
}
