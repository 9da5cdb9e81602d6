use crate::database::{Database, ImportSummary};
use crate::errors::AppResult;
use crate::export::{notify_export_success, write_document};
use crate::kv::KvStore;
use crate::models::{BackupKind, BackupSnapshot};
use crate::ui::messages::info;
use crate::utils::table::Table;
use std::path::{Path, PathBuf};

pub struct BackupLogic;

impl BackupLogic {
    /// Snapshot the current content inside the store.
    pub fn create<S: KvStore + ?Sized>(
        db: &Database<'_, S>,
        kind: BackupKind,
    ) -> AppResult<BackupSnapshot> {
        db.create_backup(kind)
    }

    /// Copy a snapshot out to a JSON file, optionally zipped.
    pub fn write_file(
        snapshot: &BackupSnapshot,
        dest: &Path,
        force: bool,
        compress: bool,
    ) -> AppResult<PathBuf> {
        let json = serde_json::to_string_pretty(snapshot)?;
        let written = write_document(dest, &json, force, compress)?;
        notify_export_success("Backup", &written);
        Ok(written)
    }

    pub fn list<S: KvStore + ?Sized>(db: &Database<'_, S>) -> AppResult<Vec<BackupSnapshot>> {
        db.list_backups()
    }

    pub fn print_list(backups: &[BackupSnapshot]) {
        if backups.is_empty() {
            info("No backups stored.");
            return;
        }

        let mut table = Table::new(["Id", "Type", "Created", "Employees", "Schedules"]);
        for b in backups {
            table.add_row(vec![
                b.id.clone(),
                b.kind.to_string(),
                b.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                b.employee_count().to_string(),
                b.schedule_count().to_string(),
            ]);
        }
        print!("{}", table.render());
    }

    pub fn restore<S: KvStore + ?Sized>(
        db: &Database<'_, S>,
        id: &str,
    ) -> AppResult<ImportSummary> {
        db.restore_backup(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use std::fs;

    #[test]
    fn snapshot_file_holds_payload() {
        let kv = MemoryStore::new();
        let mut db = Database::new(&kv);
        db.initialize();

        let snapshot = BackupLogic::create(&db, BackupKind::Manual).unwrap();
        let dest = std::env::temp_dir().join("bishop_core_backup_snapshot.json");
        fs::remove_file(&dest).ok();

        let written = BackupLogic::write_file(&snapshot, &dest, true, false).unwrap();
        let back: BackupSnapshot =
            serde_json::from_str(&fs::read_to_string(&written).unwrap()).unwrap();
        assert_eq!(back.id, snapshot.id);
        assert_eq!(back.kind, BackupKind::Manual);

        fs::remove_file(written).ok();
    }
}
