// src/export/document.rs

use crate::models::{CompanyRecord, SectorRegistry, StoredEmployee, StoredSchedule};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Format version written in every export document.
pub const EXPORT_VERSION: &str = "1.0";

/// Schedules of one namespace plus its registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleExport<R> {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub schedules: BTreeMap<String, R>,
    pub registry: SectorRegistry,
}

impl<R> ScheduleExport<R> {
    pub fn new(schedules: BTreeMap<String, R>, registry: SectorRegistry) -> Self {
        Self {
            version: EXPORT_VERSION.to_string(),
            exported_at: Utc::now(),
            schedules,
            registry,
        }
    }
}

/// Everything the database façade holds, as one JSON document.
///
/// Every section but the header is optional on read, so a schedule-only
/// export can be imported too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullExport {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyRecord>,
    #[serde(default)]
    pub employees: Vec<StoredEmployee>,
    #[serde(default)]
    pub schedules: BTreeMap<String, StoredSchedule>,
    #[serde(default)]
    pub registry: SectorRegistry,
}

impl FullExport {
    pub fn new(
        company: Option<CompanyRecord>,
        employees: Vec<StoredEmployee>,
        schedules: BTreeMap<String, StoredSchedule>,
        registry: SectorRegistry,
    ) -> Self {
        Self {
            version: EXPORT_VERSION.to_string(),
            exported_at: Utc::now(),
            company,
            employees,
            schedules,
            registry,
        }
    }
}
