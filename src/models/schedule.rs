use crate::models::sync::SyncMeta;
use crate::models::weekday::Weekday;
use crate::utils::time::{ShiftSpan, blank_schedule, shift_span, worked_hours};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Slot label ("HH:MM") → marked.
pub type SlotMap = BTreeMap<String, bool>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEmployee {
    pub id: String,
    pub name: String,
    pub role: String,
    pub sector: String,
    pub schedule: SlotMap,
}

impl ScheduledEmployee {
    /// Entry with every slot unmarked.
    pub fn blank(id: &str, name: &str, role: &str, sector: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            sector: sector.to_string(),
            schedule: blank_schedule(),
        }
    }

    pub fn worked_hours(&self) -> f64 {
        worked_hours(&self.schedule)
    }

    pub fn span(&self) -> Option<ShiftSpan> {
        shift_span(&self.schedule)
    }

    pub fn marked_slots(&self) -> usize {
        self.schedule.values().filter(|m| **m).count()
    }
}

/// Saved time grid of one sector for one day of the week.
///
/// Saves replace the whole record; there is no merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    pub sector: String,
    pub day: Weekday,
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub auto_saved: bool,
    pub employees: Vec<ScheduledEmployee>,
}

impl ScheduleRecord {
    pub fn new(sector: &str, day: Weekday) -> Self {
        Self {
            sector: sector.to_string(),
            day,
            saved_at: Utc::now(),
            auto_saved: false,
            employees: Vec::new(),
        }
    }

    pub fn employee(&self, id: &str) -> Option<&ScheduledEmployee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn employee_mut(&mut self, id: &str) -> Option<&mut ScheduledEmployee> {
        self.employees.iter_mut().find(|e| e.id == id)
    }

    pub fn total_hours(&self) -> f64 {
        self.employees.iter().map(|e| e.worked_hours()).sum()
    }
}

/// Schedule as persisted by the database façade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSchedule {
    #[serde(flatten)]
    pub record: ScheduleRecord,
    #[serde(flatten)]
    pub meta: SyncMeta,
}

/// One registry cell: when a (sector, day) was last saved and with how many
/// employees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    pub saved_at: DateTime<Utc>,
    pub employee_count: usize,
}

/// sector → day → last save.
pub type SectorRegistry = BTreeMap<String, BTreeMap<Weekday, RegistryEntry>>;
