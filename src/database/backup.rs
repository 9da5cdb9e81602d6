use super::{BACKUP_PREFIX, Database};
use crate::errors::{AppError, AppResult};
use crate::export::FullExport;
use crate::kv::{KvStore, load_json, store_json};
use crate::models::{BackupKind, BackupSnapshot, StoredEmployee, StoredSchedule, SyncMeta};
use chrono::Utc;

/// Counts of what an import wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub company: bool,
    pub employees: usize,
    pub schedules: usize,
    pub failed_schedules: usize,
}

/// Version for an incoming record: never below what is stored, never below
/// what the document carried.
fn merged_meta(current: Option<&SyncMeta>, incoming: &SyncMeta) -> SyncMeta {
    match current {
        Some(cur) => {
            let mut next = cur.bumped();
            next.version = next.version.max(incoming.version);
            next
        }
        None => SyncMeta {
            version: incoming.version.max(1),
            ..SyncMeta::fresh()
        },
    }
}

impl<'a, S: KvStore + ?Sized> Database<'a, S> {
    /// Current content as an export document.
    pub fn export_document(&self) -> AppResult<FullExport> {
        self.ensure_ready()?;

        let schedules = self.schedules();
        Ok(FullExport::new(
            self.company().load(),
            self.get_all_employees()?,
            schedules.load_all(),
            schedules.registry(),
        ))
    }

    /// Pretty-printed export document. Nothing is persisted.
    pub fn export_data(&self) -> AppResult<String> {
        let doc = self.export_document()?;
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Store a new snapshot of the current content. Older snapshots are kept.
    pub fn create_backup(&self, kind: BackupKind) -> AppResult<BackupSnapshot> {
        let payload = self.export_document()?;
        let created_at = Utc::now();

        let base = created_at.timestamp_millis().to_string();
        let mut id = base.clone();
        let mut n = 1;
        while self.kv.get(&format!("{BACKUP_PREFIX}{id}"))?.is_some() {
            id = format!("{base}-{n}");
            n += 1;
        }

        let snapshot = BackupSnapshot {
            id,
            kind,
            created_at,
            payload,
        };
        let size = store_json(self.kv, &format!("{BACKUP_PREFIX}{}", snapshot.id), &snapshot)?;
        tracing::info!(id = %snapshot.id, %kind, size, "backup created");
        Ok(snapshot)
    }

    /// Stored snapshots, newest first.
    pub fn list_backups(&self) -> AppResult<Vec<BackupSnapshot>> {
        self.ensure_ready()?;

        let mut backups = self.backups();
        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(backups)
    }

    pub fn get_backup(&self, id: &str) -> AppResult<Option<BackupSnapshot>> {
        self.ensure_ready()?;
        Ok(load_json(self.kv, &format!("{BACKUP_PREFIX}{id}"))?)
    }

    /// Write a snapshot's content back. Records absent from the snapshot are
    /// left untouched.
    pub fn restore_backup(&self, id: &str) -> AppResult<ImportSummary> {
        let snapshot = self
            .get_backup(id)?
            .ok_or_else(|| AppError::BackupNotFound(id.to_string()))?;
        self.import_document(snapshot.payload)
    }

    /// Import an export document produced by `export_data` (or a
    /// schedule-only export).
    pub fn import_data(&self, json: &str) -> AppResult<ImportSummary> {
        self.ensure_ready()?;
        let doc: FullExport = serde_json::from_str(json)?;
        self.import_document(doc)
    }

    fn import_document(&self, doc: FullExport) -> AppResult<ImportSummary> {
        self.ensure_ready()?;
        let mut summary = ImportSummary::default();

        if let Some(company) = doc.company.as_ref()
            && company.is_registered()
        {
            self.company().save(company)?;
            summary.company = true;
        }

        for incoming in doc.employees {
            let current = self.stored_employee(incoming.id())?;
            let stored = StoredEmployee {
                meta: merged_meta(current.as_ref().map(|c| &c.meta), &incoming.meta),
                employee: incoming.employee,
            };
            self.put_employee(&stored)?;
            summary.employees += 1;
        }

        let store = self.schedules();
        for incoming in doc.schedules.into_values() {
            let (sector, day) = (incoming.record.sector.clone(), incoming.record.day);
            let current = store.load(&sector, day);
            let stored = StoredSchedule {
                meta: merged_meta(current.as_ref().map(|c| &c.meta), &incoming.meta),
                record: incoming.record,
            };

            if store.save(&sector, day, &stored) {
                summary.schedules += 1;
            } else {
                summary.failed_schedules += 1;
            }
        }

        tracing::info!(
            employees = summary.employees,
            schedules = summary.schedules,
            failed = summary.failed_schedules,
            "import finished"
        );
        Ok(summary)
    }
}
