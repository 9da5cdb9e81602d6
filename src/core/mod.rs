//! Command logic shared by the CLI handlers.

pub mod backup;
pub mod clear;
pub mod company;
pub mod employee;
pub mod export;
pub mod info;
pub mod log;
pub mod schedule;

use crate::config::Config;
use crate::database::Database;
use crate::db::SqliteStore;
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};
use std::io::{self, Write};

/// Open the configured store. Schema migrations run on open.
pub fn open_store(cfg: &Config) -> AppResult<SqliteStore> {
    SqliteStore::open(&cfg.database)
}

/// Façade over `store`, initialized and ready. Migrated records are
/// reported and written to the audit log.
pub fn ready_database(store: &SqliteStore) -> Database<'_, SqliteStore> {
    let mut db = Database::new(store);
    let report = db.initialize();

    if report.migrated() > 0 {
        info(format!(
            "Migrated {} employee(s) and {} schedule(s) from the previous storage layout.",
            report.employees_migrated, report.schedules_migrated
        ));
        audit(
            store,
            "migrate_legacy",
            "",
            &format!(
                "{} employees, {} schedules",
                report.employees_migrated, report.schedules_migrated
            ),
        );
    }
    if !report.failed.is_empty() {
        warning(format!(
            "{} legacy record(s) could not be migrated: {}",
            report.failed.len(),
            report.failed.join(", ")
        ));
    }

    db
}

/// Append to the audit log. Failures are reported, never propagated.
pub fn audit(store: &SqliteStore, operation: &str, target: &str, message: &str) {
    if let Err(e) = ttlog(store.conn(), operation, target, message) {
        tracing::warn!(operation, error = %e, "failed to write audit log");
        warning(format!("Failed to write internal log: {e}"));
    }
}

/// Yes/no prompt on stdin; anything but "y"/"yes" is a no.
pub fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    io::stdout().flush().ok();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}
