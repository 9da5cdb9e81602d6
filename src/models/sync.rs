//! Versioning metadata carried by every record the database façade owns.
//!
//! `version` is a local audit counter, not a concurrency-control mechanism:
//! it only ever grows, one step per local write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Synced,
    #[default]
    Pending,
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStatus::Synced => f.write_str("synced"),
            SyncStatus::Pending => f.write_str("pending"),
        }
    }
}

fn first_version() -> u64 {
    1
}

/// Browser-saved schedules carry a format tag (`"version": "1.0"`) in the
/// same field. Anything that is not a positive integer reads as version 1.
fn lenient_version<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let version = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    };
    Ok(version.max(first_version()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMeta {
    #[serde(default = "first_version", deserialize_with = "lenient_version")]
    pub version: u64,
    #[serde(default = "chrono::Utc::now")]
    pub last_modified: DateTime<Utc>,
    #[serde(default)]
    pub sync_status: SyncStatus,
}

impl SyncMeta {
    /// Metadata for a record written for the first time.
    pub fn fresh() -> Self {
        Self {
            version: first_version(),
            last_modified: Utc::now(),
            sync_status: SyncStatus::Pending,
        }
    }

    /// Metadata for the next local write after `self`.
    pub fn bumped(&self) -> Self {
        Self {
            version: self.version + 1,
            last_modified: Utc::now(),
            sync_status: SyncStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.sync_status == SyncStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_increments_and_marks_pending() {
        let mut meta = SyncMeta::fresh();
        meta.sync_status = SyncStatus::Synced;

        let next = meta.bumped();
        assert_eq!(next.version, 2);
        assert!(next.is_pending());
        assert!(next.last_modified >= meta.last_modified);
    }

    #[test]
    fn format_tag_in_version_reads_as_first_version() {
        let tagged: SyncMeta = serde_json::from_str(r#"{"version":"1.0"}"#).unwrap();
        assert_eq!(tagged.version, 1);

        let counted: SyncMeta = serde_json::from_str(r#"{"version":7}"#).unwrap();
        assert_eq!(counted.version, 7);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let meta: SyncMeta = serde_json::from_str("{}").unwrap();
        assert_eq!(meta.version, 1);
        assert_eq!(meta.sync_status, SyncStatus::Pending);
    }
}
