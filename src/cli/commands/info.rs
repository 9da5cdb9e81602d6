use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::info::InfoLogic;
use crate::core::{open_store, ready_database};
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Info) {
        let store = open_store(cfg)?;
        let db = ready_database(&store);
        InfoLogic::print(&db, &store, store.path().unwrap_or(cfg.database.as_str()))?;
    }
    Ok(())
}
