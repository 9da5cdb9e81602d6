use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::core::{audit, open_store, ready_database};
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Backup {
        kind,
        file,
        compress,
        list,
        restore,
    } = cmd
    else {
        return Ok(());
    };

    let store = open_store(cfg)?;
    let db = ready_database(&store);

    if *list {
        BackupLogic::print_list(&BackupLogic::list(&db)?);
        return Ok(());
    }

    if let Some(id) = restore {
        let summary = BackupLogic::restore(&db, id)?;
        audit(
            &store,
            "restore",
            id,
            &format!(
                "{} employees, {} schedules",
                summary.employees, summary.schedules
            ),
        );
        success(format!(
            "Backup {id} restored: {} employee(s), {} schedule(s).",
            summary.employees, summary.schedules
        ));
        return Ok(());
    }

    let snapshot = BackupLogic::create(&db, *kind)?;
    success(format!(
        "Backup {} created ({}, {} employee(s), {} schedule(s)).",
        snapshot.id,
        snapshot.kind,
        snapshot.employee_count(),
        snapshot.schedule_count()
    ));

    let target = match file {
        Some(f) => {
            let written = BackupLogic::write_file(&snapshot, &cfg.output_path(f), false, *compress)?;
            written.to_string_lossy().to_string()
        }
        None => snapshot.id.clone(),
    };

    audit(
        &store,
        "backup",
        &target,
        if *compress {
            "Backup created and compressed"
        } else {
            "Backup created"
        },
    );

    Ok(())
}
