//! Per-(sector, day) schedule records plus the registry index.
//!
//! Records live under `<prefix><sector>_<DAY>`. The registry is a
//! denormalized listing of what has been saved and when; it can always be
//! rebuilt from a full scan.

use crate::errors::AppResult;
use crate::export::ScheduleExport;
use crate::kv::{KvStore, load_json, store_json};
use crate::models::{RegistryEntry, ScheduleRecord, SectorRegistry, StoredSchedule, Weekday};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::marker::PhantomData;

/// Key namespace of a schedule store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleKeys {
    pub prefix: &'static str,
    pub registry: &'static str,
}

/// Layout written by the browser-storage version of the application.
pub const LEGACY_SCHEDULE_KEYS: ScheduleKeys = ScheduleKeys {
    prefix: "schedule_",
    registry: "saved_sectors_registry",
};

/// Record types a `ScheduleStore` can hold.
pub trait ScheduleDocument: Serialize + DeserializeOwned {
    fn sector(&self) -> &str;
    fn day(&self) -> Weekday;
    fn saved_at(&self) -> DateTime<Utc>;
    fn employee_count(&self) -> usize;
}

impl ScheduleDocument for ScheduleRecord {
    fn sector(&self) -> &str {
        &self.sector
    }

    fn day(&self) -> Weekday {
        self.day
    }

    fn saved_at(&self) -> DateTime<Utc> {
        self.saved_at
    }

    fn employee_count(&self) -> usize {
        self.employees.len()
    }
}

impl ScheduleDocument for StoredSchedule {
    fn sector(&self) -> &str {
        &self.record.sector
    }

    fn day(&self) -> Weekday {
        self.record.day
    }

    fn saved_at(&self) -> DateTime<Utc> {
        self.record.saved_at
    }

    fn employee_count(&self) -> usize {
        self.record.employees.len()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScheduleStorageInfo {
    pub total_schedules: usize,
    /// Sum of the serialized record lengths.
    pub total_size: usize,
    pub sectors: Vec<String>,
}

pub struct ScheduleStore<'a, S: KvStore + ?Sized, R = ScheduleRecord> {
    kv: &'a S,
    keys: ScheduleKeys,
    _record: PhantomData<R>,
}

impl<'a, S: KvStore + ?Sized> ScheduleStore<'a, S, ScheduleRecord> {
    pub fn legacy(kv: &'a S) -> Self {
        Self::with_keys(kv, LEGACY_SCHEDULE_KEYS)
    }
}

impl<'a, S, R> ScheduleStore<'a, S, R>
where
    S: KvStore + ?Sized,
    R: ScheduleDocument,
{
    pub fn with_keys(kv: &'a S, keys: ScheduleKeys) -> Self {
        Self {
            kv,
            keys,
            _record: PhantomData,
        }
    }

    pub fn keys(&self) -> ScheduleKeys {
        self.keys
    }

    pub fn storage_key(&self, sector: &str, day: Weekday) -> String {
        format!("{}{}_{}", self.keys.prefix, sector, day.as_str())
    }

    fn is_record_key(&self, key: &str) -> bool {
        key.starts_with(self.keys.prefix) && key != self.keys.registry
    }

    /// Replace the record for (sector, day) and refresh its registry entry.
    /// Returns `false` if the record could not be written.
    pub fn save(&self, sector: &str, day: Weekday, record: &R) -> bool {
        let key = self.storage_key(sector, day);

        if let Err(e) = store_json(self.kv, &key, record) {
            tracing::warn!(%key, error = %e, "failed to save schedule");
            return false;
        }

        if let Err(e) = self.update_registry(sector, day, record) {
            tracing::warn!(%key, error = %e, "failed to update schedule registry");
        }

        true
    }

    fn update_registry(&self, sector: &str, day: Weekday, record: &R) -> AppResult<()> {
        let mut registry = self.registry();
        registry.entry(sector.to_string()).or_default().insert(
            day,
            RegistryEntry {
                saved_at: record.saved_at(),
                employee_count: record.employee_count(),
            },
        );
        store_json(self.kv, self.keys.registry, &registry)?;
        Ok(())
    }

    pub fn load(&self, sector: &str, day: Weekday) -> Option<R> {
        let key = self.storage_key(sector, day);
        match load_json(self.kv, &key) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(%key, error = %e, "failed to read schedule");
                None
            }
        }
    }

    /// Every readable record, by storage key. Corrupt entries are skipped.
    pub fn load_all(&self) -> BTreeMap<String, R> {
        let mut schedules = BTreeMap::new();

        let keys = match self.kv.keys(Some(self.keys.prefix)) {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!(error = %e, "failed to list schedules");
                return schedules;
            }
        };

        for key in keys.into_iter().filter(|k| self.is_record_key(k)) {
            match load_json::<_, R>(self.kv, &key) {
                Ok(Some(record)) => {
                    schedules.insert(key, record);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(%key, error = %e, "skipping unreadable schedule"),
            }
        }

        schedules
    }

    /// Stored registry, `{}` when missing or corrupt.
    pub fn registry(&self) -> SectorRegistry {
        match load_json(self.kv, self.keys.registry) {
            Ok(registry) => registry.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read schedule registry");
                SectorRegistry::new()
            }
        }
    }

    /// Registry recomputed from a full scan of the records.
    pub fn rebuild_registry(&self) -> SectorRegistry {
        let mut registry = SectorRegistry::new();
        for record in self.load_all().values() {
            registry.entry(record.sector().to_string()).or_default().insert(
                record.day(),
                RegistryEntry {
                    saved_at: record.saved_at(),
                    employee_count: record.employee_count(),
                },
            );
        }
        registry
    }

    /// Remove every record and the registry.
    ///
    /// Keys are collected first and removed afterwards. Returns `false` only
    /// when the adapter fails.
    pub fn clear_all(&self) -> bool {
        let result = (|| -> AppResult<usize> {
            let mut doomed = self.kv.keys(Some(self.keys.prefix))?;
            if self.kv.get(self.keys.registry)?.is_some()
                && !doomed.iter().any(|k| k == self.keys.registry)
            {
                doomed.push(self.keys.registry.to_string());
            }

            for key in &doomed {
                self.kv.remove(key)?;
            }
            Ok(doomed.len())
        })();

        match result {
            Ok(removed) => {
                tracing::debug!(removed, prefix = self.keys.prefix, "schedules cleared");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to clear schedules");
                false
            }
        }
    }

    /// Pretty JSON `{version, exportedAt, schedules, registry}`; empty string
    /// on failure.
    pub fn export(&self) -> String {
        let doc = ScheduleExport::new(self.load_all(), self.registry());
        match serde_json::to_string_pretty(&doc) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "failed to export schedules");
                String::new()
            }
        }
    }

    pub fn storage_info(&self) -> ScheduleStorageInfo {
        let schedules = self.load_all();
        let total_size = schedules
            .values()
            .filter_map(|r| serde_json::to_string(r).ok())
            .map(|s| s.len())
            .sum();

        ScheduleStorageInfo {
            total_schedules: schedules.len(),
            total_size,
            sectors: self.registry().into_keys().collect(),
        }
    }
}
