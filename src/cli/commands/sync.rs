use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::info::InfoLogic;
use crate::core::{open_store, ready_database};
use crate::errors::AppResult;

/// Read-only: lists what a remote sync would have to push.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Sync) {
        let store = open_store(cfg)?;
        let db = ready_database(&store);
        InfoLogic::print_pending(&InfoLogic::pending(&db)?);
    }
    Ok(())
}
