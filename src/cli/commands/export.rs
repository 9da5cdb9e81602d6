use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::core::{audit, open_store, ready_database};
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        file,
        force,
        compress,
    } = cmd
    {
        let store = open_store(cfg)?;
        let db = ready_database(&store);

        let written = ExportLogic::export(&db, &cfg.output_path(file), *force, *compress)?;
        audit(
            &store,
            "export",
            &written.to_string_lossy(),
            "Full export written",
        );
    }
    Ok(())
}
