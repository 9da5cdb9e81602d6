//! One-way copy of browser-storage records into the façade's layout.
//!
//! The copy is non-destructive: legacy keys are never removed here. A legacy
//! record is copied once: the status record remembers which employee ids and
//! schedule keys were taken, so a later delete in the façade sticks and a
//! re-run after a complete pass finds nothing to do.

use super::{DB_SCHEDULE_KEYS, Database, MIGRATION_STATUS_KEY};
use crate::errors::AppError;
use crate::kv::{KvStore, load_json, store_json};
use crate::models::{
    EmployeeRecord, LegacyEmployee, ScheduleRecord, StoredEmployee, StoredSchedule, SyncMeta,
};
use crate::store::ScheduleStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const LEGACY_EMPLOYEES_KEY: &str = "bishop_employees";

/// Audit record of past migrations, kept under `bishopdb_migration_status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationStatus {
    pub migrated_at: DateTime<Utc>,
    /// Always true: legacy keys are left in place.
    pub source_keys_retained: bool,
    pub employees_migrated: usize,
    pub schedules_migrated: usize,
    pub failures: usize,
    #[serde(default)]
    pub runs: u32,
    /// Legacy employee ids already copied.
    #[serde(default)]
    pub migrated_employee_ids: BTreeSet<String>,
    /// Legacy schedule keys already copied.
    #[serde(default)]
    pub migrated_schedule_keys: BTreeSet<String>,
}

/// Result of one `initialize` call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MigrationReport {
    pub employees_migrated: usize,
    pub schedules_migrated: usize,
    /// Legacy keys (or list entries) that could not be migrated.
    pub failed: Vec<String>,
}

impl MigrationReport {
    pub fn migrated(&self) -> usize {
        self.employees_migrated + self.schedules_migrated
    }

    pub fn is_empty(&self) -> bool {
        self.migrated() == 0 && self.failed.is_empty()
    }
}

/// Legacy records that still need copying.
#[derive(Default)]
pub(super) struct LegacyScan {
    pub employees: Vec<EmployeeRecord>,
    /// (legacy key, record)
    pub schedules: Vec<(String, ScheduleRecord)>,
    pub failed: Vec<String>,
}

impl LegacyScan {
    pub fn has_work(&self) -> bool {
        !self.employees.is_empty() || !self.schedules.is_empty()
    }
}

impl<'a, S: KvStore + ?Sized> Database<'a, S> {
    fn target_exists(&self, key: &str) -> bool {
        match self.kv.get(key) {
            Ok(found) => found.is_some(),
            Err(e) => {
                // Unknown: treat as present so nothing gets overwritten.
                tracing::warn!(key, error = %e, "cannot check migration target");
                true
            }
        }
    }

    pub(super) fn scan_legacy(&self) -> LegacyScan {
        let mut scan = LegacyScan::default();
        let done = self.migration_status();
        let employee_done =
            |id: &str| done.as_ref().is_some_and(|s| s.migrated_employee_ids.contains(id));
        let schedule_done =
            |key: &str| done.as_ref().is_some_and(|s| s.migrated_schedule_keys.contains(key));

        match load_json::<_, Vec<serde_json::Value>>(self.kv, LEGACY_EMPLOYEES_KEY) {
            Ok(Some(entries)) => {
                for (i, raw) in entries.into_iter().enumerate() {
                    let fingerprint = raw.to_string();
                    let converted = serde_json::from_value::<LegacyEmployee>(raw)
                        .map_err(AppError::from)
                        .map(|old| old.with_stable_id(i, &fingerprint))
                        .and_then(EmployeeRecord::try_from);

                    match converted {
                        Ok(employee) => {
                            if !employee_done(&employee.id)
                                && !self.target_exists(&Self::employee_key(&employee.id))
                            {
                                scan.employees.push(employee);
                            }
                        }
                        Err(e) => {
                            tracing::warn!(index = i, error = %e, "legacy employee not migratable");
                            scan.failed.push(format!("{LEGACY_EMPLOYEES_KEY}[{i}]"));
                        }
                    }
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "cannot read legacy employees");
                scan.failed.push(LEGACY_EMPLOYEES_KEY.to_string());
            }
        }

        let target: ScheduleStore<'_, S, StoredSchedule> =
            ScheduleStore::with_keys(self.kv, DB_SCHEDULE_KEYS);
        for (key, record) in ScheduleStore::legacy(self.kv).load_all() {
            if !schedule_done(&key)
                && !self.target_exists(&target.storage_key(&record.sector, record.day))
            {
                scan.schedules.push((key, record));
            }
        }

        scan
    }

    pub(super) fn apply_migration(&self, scan: LegacyScan) -> MigrationReport {
        let mut report = MigrationReport {
            failed: scan.failed,
            ..MigrationReport::default()
        };

        let mut employee_ids = Vec::new();
        let mut schedule_keys = Vec::new();

        for employee in scan.employees {
            let key = Self::employee_key(&employee.id);
            let stored = StoredEmployee {
                employee,
                meta: SyncMeta::fresh(),
            };
            match store_json(self.kv, &key, &stored) {
                Ok(_) => {
                    report.employees_migrated += 1;
                    employee_ids.push(stored.employee.id);
                }
                Err(e) => {
                    tracing::warn!(%key, error = %e, "employee migration failed");
                    report.failed.push(key);
                }
            }
        }

        let target = self.schedules();
        for (legacy_key, record) in scan.schedules {
            let (sector, day) = (record.sector.clone(), record.day);
            let stored = StoredSchedule {
                record,
                meta: SyncMeta::fresh(),
            };
            if target.save(&sector, day, &stored) {
                report.schedules_migrated += 1;
                schedule_keys.push(legacy_key);
            } else {
                report.failed.push(target.storage_key(&sector, day));
            }
        }

        if report.migrated() > 0 {
            self.record_migration(&report, employee_ids, schedule_keys);
        }

        if !report.failed.is_empty() {
            tracing::warn!(failed = report.failed.len(), "migration incomplete, will retry");
        }

        report
    }

    fn record_migration(
        &self,
        report: &MigrationReport,
        employee_ids: Vec<String>,
        schedule_keys: Vec<String>,
    ) {
        let previous = self.migration_status();

        let mut migrated_employee_ids = previous
            .as_ref()
            .map(|p| p.migrated_employee_ids.clone())
            .unwrap_or_default();
        migrated_employee_ids.extend(employee_ids);
        let mut migrated_schedule_keys = previous
            .as_ref()
            .map(|p| p.migrated_schedule_keys.clone())
            .unwrap_or_default();
        migrated_schedule_keys.extend(schedule_keys);

        let status = MigrationStatus {
            migrated_at: Utc::now(),
            source_keys_retained: true,
            employees_migrated: previous.as_ref().map_or(0, |p| p.employees_migrated)
                + report.employees_migrated,
            schedules_migrated: previous.as_ref().map_or(0, |p| p.schedules_migrated)
                + report.schedules_migrated,
            failures: report.failed.len(),
            runs: previous.as_ref().map_or(0, |p| p.runs) + 1,
            migrated_employee_ids,
            migrated_schedule_keys,
        };

        if let Err(e) = store_json(self.kv, MIGRATION_STATUS_KEY, &status) {
            tracing::warn!(error = %e, "failed to record migration status");
        }
    }
}
