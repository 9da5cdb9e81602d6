use crate::core::schedule::ScheduleLogic;
use crate::database::{Database, PendingSync, StorageInfo};
use crate::errors::AppResult;
use crate::kv::KvStore;
use crate::ui::messages::{field, header, success};
use crate::utils::table::Table;

pub struct InfoLogic;

impl InfoLogic {
    pub fn print<S: KvStore + ?Sized>(
        db: &Database<'_, S>,
        kv: &S,
        location: &str,
    ) -> AppResult<StorageInfo> {
        let info = db.storage_info()?;

        header("Storage");
        field("Database", location);
        field("State", db.state().as_str());
        field("Employees", info.total_employees);
        field("Schedules", info.total_schedules);
        field("Backups", info.total_backups);
        field("Size", format!("{:.1} KiB", info.estimated_size as f64 / 1024.0));
        field(
            "Last backup",
            info.last_backup
                .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_else(|| "never".to_string()),
        );
        field("Sectors", info.sectors.join(", "));

        if let Some(status) = db.migration_status() {
            println!();
            header("Migration");
            field("Last run", status.migrated_at.format("%Y-%m-%d %H:%M UTC"));
            field("Runs", status.runs);
            field("Employees", status.employees_migrated);
            field("Schedules", status.schedules_migrated);
            field("Failures", status.failures);
            field("Sources kept", status.source_keys_retained);
        }

        let legacy = ScheduleLogic::legacy_info(kv);
        if legacy.total_schedules > 0 {
            field(
                "Legacy copies",
                format!(
                    "{} schedule(s), {} bytes",
                    legacy.total_schedules, legacy.total_size
                ),
            );
        }

        Ok(info)
    }

    pub fn pending<S: KvStore + ?Sized>(db: &Database<'_, S>) -> AppResult<PendingSync> {
        db.pending_sync()
    }

    pub fn print_pending(pending: &PendingSync) {
        if pending.is_empty() {
            success("Nothing waiting for synchronization.");
            return;
        }

        let mut table = Table::new(["Kind", "Record", "Version", "Modified"]);
        for e in &pending.employees {
            table.add_row(vec![
                "employee".into(),
                format!("{} ({})", e.employee.name, e.employee.sector),
                e.meta.version.to_string(),
                e.meta.last_modified.format("%Y-%m-%d %H:%M").to_string(),
            ]);
        }
        for s in &pending.schedules {
            table.add_row(vec![
                "schedule".into(),
                format!("{} / {}", s.record.sector, s.record.day),
                s.meta.version.to_string(),
                s.meta.last_modified.format("%Y-%m-%d %H:%M").to_string(),
            ]);
        }
        print!("{}", table.render());
        println!(
            "\n{} employee(s), {} schedule(s) pending.",
            pending.employees.len(),
            pending.schedules.len()
        );
    }
}
