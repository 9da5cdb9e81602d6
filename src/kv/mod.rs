//! Key-value storage adapter.
//!
//! Every persistent record in the application lives behind a `KvStore`:
//! string keys mapping to JSON-encoded string values. Two backends exist,
//! an in-memory one (tests, dry runs) and the SQLite-backed store in
//! [`crate::db`]. Any call may fail; callers decide whether the failure is
//! fatal (employee mutations) or degrades to a default (reads).

mod memory;

pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistent string-to-string map.
pub trait KvStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// All keys, or only those starting with `prefix`. Order is unspecified.
    fn keys(&self, prefix: Option<&str>) -> StorageResult<Vec<String>>;
}

/// Read and decode a JSON value.
///
/// A missing key and an undecodable value both yield `Ok(None)`; the latter
/// is logged. Only adapter failures surface as `Err`.
pub fn load_json<S, T>(kv: &S, key: &str) -> StorageResult<Option<T>>
where
    S: KvStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = kv.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key, error = %e, "corrupt record treated as absent");
            Ok(None)
        }
    }
}

/// Encode `value` as JSON and write it under `key`.
pub fn store_json<S, T>(kv: &S, key: &str, value: &T) -> crate::errors::AppResult<usize>
where
    S: KvStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    kv.set(key, &raw)?;
    Ok(raw.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Probe {
        n: u32,
    }

    #[test]
    fn load_json_treats_garbage_as_absent() {
        let kv = MemoryStore::new();
        kv.set("probe", "{not json").unwrap();

        let loaded: Option<Probe> = load_json(&kv, "probe").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn store_then_load_json() {
        let kv = MemoryStore::new();
        store_json(&kv, "probe", &Probe { n: 7 }).unwrap();

        let loaded: Option<Probe> = load_json(&kv, "probe").unwrap();
        assert_eq!(loaded, Some(Probe { n: 7 }));
    }

    #[test]
    fn load_json_propagates_adapter_failure() {
        let kv = MemoryStore::new();
        kv.set_unavailable(true);

        let res: StorageResult<Option<Probe>> = load_json(&kv, "probe");
        assert!(matches!(res, Err(StorageError::Unavailable(_))));
    }
}
