use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clear::ClearLogic;
use crate::core::{ask_confirmation, audit, open_store, ready_database};
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clear { yes } = cmd {
        if !yes
            && !ask_confirmation("Delete ALL employees? A backup is taken first; schedules are kept.")
        {
            info("Operation cancelled.");
            return Ok(());
        }

        let store = open_store(cfg)?;
        let db = ready_database(&store);

        let outcome = ClearLogic::apply(&db)?;
        audit(
            &store,
            "clear_all",
            outcome.backup_id.as_deref().unwrap_or(""),
            &format!("{} employees removed", outcome.employees_removed),
        );
        ClearLogic::report(&outcome);
    }
    Ok(())
}
