use crate::errors::AppError;
use crate::export::FullExport;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackupKind {
    Auto,
    #[default]
    Manual,
}

impl BackupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackupKind::Auto => "auto",
            BackupKind::Manual => "manual",
        }
    }
}

impl fmt::Display for BackupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackupKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(BackupKind::Auto),
            "manual" => Ok(BackupKind::Manual),
            _ => Err(AppError::InvalidBackupKind(s.to_string())),
        }
    }
}

/// Immutable full-export snapshot kept inside the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSnapshot {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BackupKind,
    pub created_at: DateTime<Utc>,
    pub payload: FullExport,
}

impl BackupSnapshot {
    pub fn employee_count(&self) -> usize {
        self.payload.employees.len()
    }

    pub fn schedule_count(&self) -> usize {
        self.payload.schedules.len()
    }
}
