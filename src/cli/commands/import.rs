use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::core::{audit, open_store, ready_database};
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let store = open_store(cfg)?;
        let db = ready_database(&store);

        let summary = ExportLogic::import(&db, Path::new(file))?;
        let message = format!(
            "{} employee(s), {} schedule(s){}",
            summary.employees,
            summary.schedules,
            if summary.company { ", company" } else { "" }
        );
        audit(&store, "import", file, &message);

        success(format!("Imported {message}."));
        if summary.failed_schedules > 0 {
            warning(format!(
                "{} schedule(s) could not be written.",
                summary.failed_schedules
            ));
        }
    }
    Ok(())
}
