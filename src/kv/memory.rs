//! In-memory `KvStore` with optional quota and failure injection.

use super::{KvStore, StorageError, StorageResult};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    quota: Option<usize>,
    unavailable: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes once keys plus values exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Make every subsequent call fail, as a disabled browser storage would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn check_available(&self) -> StorageResult<()> {
        if self.unavailable.get() {
            return Err(StorageError::Unavailable(
                "in-memory store disabled".to_string(),
            ));
        }
        Ok(())
    }

    fn used_bytes(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.check_available()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check_available()?;

        if let Some(quota) = self.quota {
            let replaced = self
                .entries
                .borrow()
                .get(key)
                .map(|old| key.len() + old.len())
                .unwrap_or(0);
            let needed = self.used_bytes() - replaced + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }

        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.check_available()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self, prefix: Option<&str>) -> StorageResult<Vec<String>> {
        self.check_available()?;
        Ok(self
            .entries
            .borrow()
            .keys()
            .filter(|k| prefix.is_none_or(|p| k.starts_with(p)))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_filters_by_prefix() {
        let kv = MemoryStore::new();
        kv.set("schedule_a", "1").unwrap();
        kv.set("schedule_b", "2").unwrap();
        kv.set("other", "3").unwrap();

        let mut keys = kv.keys(Some("schedule_")).unwrap();
        keys.sort();
        assert_eq!(keys, vec!["schedule_a", "schedule_b"]);
        assert_eq!(kv.keys(None).unwrap().len(), 3);
    }

    #[test]
    fn quota_rejects_oversized_write() {
        let kv = MemoryStore::with_quota(10);
        kv.set("k", "12345").unwrap();

        let err = kv.set("k2", "123456789").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));

        // overwriting an entry only counts the difference
        kv.set("k", "123456789").unwrap();
        assert_eq!(kv.get("k").unwrap().as_deref(), Some("123456789"));
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let kv = MemoryStore::new();
        kv.remove("nothing").unwrap();
        assert!(kv.is_empty());
    }

    #[test]
    fn unavailable_store_fails_every_call() {
        let kv = MemoryStore::new();
        kv.set_unavailable(true);
        assert!(kv.get("x").is_err());
        assert!(kv.set("x", "y").is_err());
        assert!(kv.keys(None).is_err());

        kv.set_unavailable(false);
        assert!(kv.set("x", "y").is_ok());
    }
}
