//! Database façade over employees, schedules and backups.
//!
//! Every record owned here carries `SyncMeta` (version, last modified,
//! sync status) so a future remote store can tell what has not been pushed.
//! The façade must be initialized once; initialization migrates records the
//! browser-storage layout left behind and then moves to `Ready`.

mod backup;
mod migrate;

pub use backup::ImportSummary;
pub use migrate::{LEGACY_EMPLOYEES_KEY, MigrationReport, MigrationStatus};

use crate::errors::{AppError, AppResult};
use crate::kv::{KvStore, load_json, store_json};
use crate::models::{
    BackupKind, BackupSnapshot, EmployeeRecord, ScheduleRecord, SectorRegistry, StoredEmployee,
    StoredSchedule, SyncMeta, Weekday,
};
use crate::store::{CompanyStore, ScheduleKeys, ScheduleStore};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

pub const DB_PREFIX: &str = "bishopdb_";
pub const EMPLOYEE_PREFIX: &str = "bishopdb_employee_";
pub const BACKUP_PREFIX: &str = "bishopdb_backup_";
pub const MIGRATION_STATUS_KEY: &str = "bishopdb_migration_status";
pub const DB_SCHEDULE_KEYS: ScheduleKeys = ScheduleKeys {
    prefix: "bishopdb_schedule_",
    registry: "bishopdb_schedule_registry",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbState {
    Uninitialized,
    Migrating,
    Ready,
}

impl DbState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DbState::Uninitialized => "uninitialized",
            DbState::Migrating => "migrating",
            DbState::Ready => "ready",
        }
    }
}

/// Aggregate figures over everything the façade stores.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StorageInfo {
    pub total_employees: usize,
    pub total_schedules: usize,
    pub total_backups: usize,
    /// Bytes of serialized values under the façade's keys.
    pub estimated_size: usize,
    pub sectors: Vec<String>,
    pub last_backup: Option<DateTime<Utc>>,
}

/// Records written locally and not yet pushed anywhere.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PendingSync {
    pub employees: Vec<StoredEmployee>,
    pub schedules: Vec<StoredSchedule>,
}

impl PendingSync {
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty() && self.schedules.is_empty()
    }
}

/// What `clear_all_data` did to schedules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleClearance {
    /// Schedule deletion is not part of "clear all"; the records stay.
    NotImplemented { retained: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearOutcome {
    /// Backup taken before clearing, if it could be written.
    pub backup_id: Option<String>,
    pub employees_removed: usize,
    pub schedules: ScheduleClearance,
}

pub struct Database<'a, S: KvStore + ?Sized> {
    kv: &'a S,
    state: DbState,
}

impl<'a, S: KvStore + ?Sized> Database<'a, S> {
    pub fn new(kv: &'a S) -> Self {
        Self {
            kv,
            state: DbState::Uninitialized,
        }
    }

    pub fn state(&self) -> DbState {
        self.state
    }

    /// Migrate leftover legacy records, then become `Ready`.
    ///
    /// Never fails: records that cannot be migrated stay where they are and
    /// are retried on the next call. Calling it again once everything is
    /// migrated does nothing.
    pub fn initialize(&mut self) -> MigrationReport {
        let scan = self.scan_legacy();

        if scan.has_work() {
            self.state = DbState::Migrating;
            tracing::info!(
                employees = scan.employees.len(),
                schedules = scan.schedules.len(),
                "migrating legacy records"
            );
        }

        let report = self.apply_migration(scan);
        self.state = DbState::Ready;
        report
    }

    fn ensure_ready(&self) -> AppResult<()> {
        if self.state == DbState::Ready {
            Ok(())
        } else {
            Err(AppError::NotReady(self.state.as_str()))
        }
    }

    pub fn company(&self) -> CompanyStore<'a, S> {
        CompanyStore::new(self.kv)
    }

    fn schedules(&self) -> ScheduleStore<'a, S, StoredSchedule> {
        ScheduleStore::with_keys(self.kv, DB_SCHEDULE_KEYS)
    }

    fn employee_key(id: &str) -> String {
        format!("{EMPLOYEE_PREFIX}{id}")
    }

    /// Lookup that propagates adapter failures.
    fn stored_employee(&self, id: &str) -> AppResult<Option<StoredEmployee>> {
        Ok(load_json(self.kv, &Self::employee_key(id))?)
    }

    fn put_employee(&self, stored: &StoredEmployee) -> AppResult<()> {
        store_json(self.kv, &Self::employee_key(stored.id()), stored)?;
        Ok(())
    }

    // ---------------------------
    // Employees
    // ---------------------------

    /// Persist a new employee at version 1. An empty id gets a fresh one.
    pub fn add_employee(&self, mut employee: EmployeeRecord) -> AppResult<StoredEmployee> {
        self.ensure_ready()?;

        if employee.id.trim().is_empty() {
            employee.id = EmployeeRecord::new_id();
        }

        if self.stored_employee(&employee.id)?.is_some() {
            return Err(AppError::DuplicateEmployee(employee.id));
        }

        let stored = StoredEmployee {
            employee,
            meta: SyncMeta::fresh(),
        };
        self.put_employee(&stored)?;
        tracing::debug!(id = stored.id(), "employee added");
        Ok(stored)
    }

    /// Overwrite an employee. The new version is the *stored* version plus
    /// one; whatever version the caller passed is ignored.
    pub fn update_employee(&self, record: StoredEmployee) -> AppResult<StoredEmployee> {
        self.ensure_ready()?;

        let current = self
            .stored_employee(record.id())?
            .ok_or_else(|| AppError::EmployeeNotFound(record.id().to_string()))?;

        let updated = StoredEmployee {
            employee: record.employee,
            meta: current.meta.bumped(),
        };
        self.put_employee(&updated)?;
        tracing::debug!(id = updated.id(), version = updated.meta.version, "employee updated");
        Ok(updated)
    }

    /// Like `update_employee`, but refuses to write when the stored version
    /// is not `expected_version`.
    pub fn update_employee_expecting(
        &self,
        record: StoredEmployee,
        expected_version: u64,
    ) -> AppResult<StoredEmployee> {
        self.ensure_ready()?;

        let current = self
            .stored_employee(record.id())?
            .ok_or_else(|| AppError::EmployeeNotFound(record.id().to_string()))?;

        if current.meta.version != expected_version {
            return Err(AppError::VersionConflict {
                id: record.id().to_string(),
                expected: expected_version,
                stored: current.meta.version,
            });
        }

        self.update_employee(record)
    }

    /// Remove an employee; unknown ids are a no-op. Schedules that mention
    /// the employee are left as they are.
    pub fn delete_employee(&self, id: &str) -> AppResult<()> {
        self.ensure_ready()?;
        self.kv.remove(&Self::employee_key(id))?;
        tracing::debug!(id, "employee deleted");
        Ok(())
    }

    pub fn get_employee(&self, id: &str) -> AppResult<Option<StoredEmployee>> {
        self.ensure_ready()?;
        match self.stored_employee(id) {
            Ok(found) => Ok(found),
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to read employee");
                Ok(None)
            }
        }
    }

    /// All readable employees, in no particular order.
    pub fn get_all_employees(&self) -> AppResult<Vec<StoredEmployee>> {
        self.ensure_ready()?;

        let keys = match self.kv.keys(Some(EMPLOYEE_PREFIX)) {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!(error = %e, "failed to list employees");
                return Ok(Vec::new());
            }
        };

        let mut employees = Vec::with_capacity(keys.len());
        for key in keys {
            match load_json::<_, StoredEmployee>(self.kv, &key) {
                Ok(Some(e)) => employees.push(e),
                Ok(None) => {}
                Err(e) => tracing::warn!(%key, error = %e, "skipping unreadable employee"),
            }
        }
        Ok(employees)
    }

    // ---------------------------
    // Schedules
    // ---------------------------

    /// Save a schedule, bumping its version. `false` when the write failed.
    pub fn save_schedule(&self, record: ScheduleRecord) -> AppResult<bool> {
        self.ensure_ready()?;

        let store = self.schedules();
        let (sector, day) = (record.sector.clone(), record.day);
        let meta = match store.load(&sector, day) {
            Some(previous) => previous.meta.bumped(),
            None => SyncMeta::fresh(),
        };

        Ok(store.save(&sector, day, &StoredSchedule { record, meta }))
    }

    pub fn load_schedule(&self, sector: &str, day: Weekday) -> AppResult<Option<StoredSchedule>> {
        self.ensure_ready()?;
        Ok(self.schedules().load(sector, day))
    }

    pub fn get_all_schedules(&self) -> AppResult<Vec<StoredSchedule>> {
        self.ensure_ready()?;
        Ok(self.schedules().load_all().into_values().collect())
    }

    pub fn schedule_registry(&self) -> AppResult<SectorRegistry> {
        self.ensure_ready()?;
        Ok(self.schedules().registry())
    }

    // ---------------------------
    // Status
    // ---------------------------

    pub fn storage_info(&self) -> AppResult<StorageInfo> {
        let employees = self.get_all_employees()?;
        let schedules = self.schedules().load_all();
        let backups = self.list_backups()?;

        let estimated_size = match self.kv.keys(Some(DB_PREFIX)) {
            Ok(keys) => keys
                .iter()
                .filter_map(|k| self.kv.get(k).ok().flatten())
                .map(|v| v.len())
                .sum(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to size storage");
                0
            }
        };

        let sectors: BTreeSet<String> = schedules
            .values()
            .map(|s| s.record.sector.clone())
            .chain(employees.iter().map(|e| e.employee.sector.clone()))
            .filter(|s| !s.trim().is_empty())
            .collect();

        Ok(StorageInfo {
            total_employees: employees.len(),
            total_schedules: schedules.len(),
            total_backups: backups.len(),
            estimated_size,
            sectors: sectors.into_iter().collect(),
            last_backup: backups.iter().map(|b| b.created_at).max(),
        })
    }

    /// Employees and schedules whose sync status is `pending`. Read-only.
    pub fn pending_sync(&self) -> AppResult<PendingSync> {
        Ok(PendingSync {
            employees: self
                .get_all_employees()?
                .into_iter()
                .filter(|e| e.meta.is_pending())
                .collect(),
            schedules: self
                .get_all_schedules()?
                .into_iter()
                .filter(|s| s.meta.is_pending())
                .collect(),
        })
    }

    pub fn migration_status(&self) -> Option<MigrationStatus> {
        load_json(self.kv, MIGRATION_STATUS_KEY).ok().flatten()
    }

    // ---------------------------
    // Clear
    // ---------------------------

    /// Take a manual backup, then delete employees one by one.
    ///
    /// A failed backup does not stop the clear. Schedules are not deleted:
    /// the outcome reports them as `NotImplemented`. Not atomic: a failing
    /// delete leaves the employees before it removed.
    pub fn clear_all_data(&self) -> AppResult<ClearOutcome> {
        self.ensure_ready()?;

        let backup_id = match self.create_backup(BackupKind::Manual) {
            Ok(snapshot) => Some(snapshot.id),
            Err(e) => {
                tracing::warn!(error = %e, "backup before clear failed, clearing anyway");
                None
            }
        };

        let mut employees_removed = 0;
        for employee in self.get_all_employees()? {
            self.delete_employee(employee.id())?;
            employees_removed += 1;
        }

        let retained = self.schedules().load_all().len();
        tracing::info!(employees_removed, retained, "all data cleared except schedules");

        Ok(ClearOutcome {
            backup_id,
            employees_removed,
            schedules: ScheduleClearance::NotImplemented { retained },
        })
    }

    fn backups(&self) -> Vec<BackupSnapshot> {
        let keys = match self.kv.keys(Some(BACKUP_PREFIX)) {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!(error = %e, "failed to list backups");
                return Vec::new();
            }
        };

        keys.iter()
            .filter_map(|k| load_json::<_, BackupSnapshot>(self.kv, k).ok().flatten())
            .collect()
    }
}
