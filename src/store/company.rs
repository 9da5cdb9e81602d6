use crate::errors::AppResult;
use crate::kv::{KvStore, load_json, store_json};
use crate::models::CompanyRecord;
use chrono::Utc;

pub const COMPANY_KEY: &str = "bishop-company-data";

/// Singleton company record.
pub struct CompanyStore<'a, S: KvStore + ?Sized> {
    kv: &'a S,
}

impl<'a, S: KvStore + ?Sized> CompanyStore<'a, S> {
    pub fn new(kv: &'a S) -> Self {
        Self { kv }
    }

    /// Write the record, stamping `registrationDate` on first save.
    ///
    /// An already stored registration date always wins, so editing the
    /// company never moves it.
    pub fn save(&self, record: &CompanyRecord) -> AppResult<CompanyRecord> {
        let previous = self.load().and_then(|c| c.registration_date);

        let mut to_save = record.clone();
        to_save.registration_date = previous
            .or(record.registration_date)
            .or_else(|| Some(Utc::now()));

        store_json(self.kv, COMPANY_KEY, &to_save)?;
        tracing::debug!(name = %to_save.name, "company record saved");
        Ok(to_save)
    }

    /// `None` when missing, corrupt, or unreadable.
    pub fn load(&self) -> Option<CompanyRecord> {
        match load_json(self.kv, COMPANY_KEY) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read company record");
                None
            }
        }
    }

    pub fn clear(&self) -> AppResult<()> {
        self.kv.remove(COMPANY_KEY)?;
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.load().is_some_and(|c| c.is_registered())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    fn sample() -> CompanyRecord {
        CompanyRecord::new(
            "Bishop Bar",
            "12.345.678/0001-90",
            "Rua das Flores, 10",
            "Noturno",
            "Bar e restaurante",
        )
    }

    #[test]
    fn save_then_load_round_trip() {
        let kv = MemoryStore::new();
        let store = CompanyStore::new(&kv);

        let saved = store.save(&sample()).unwrap();
        assert!(saved.registration_date.is_some());
        assert_eq!(store.load(), Some(saved));
        assert!(store.exists());
    }

    #[test]
    fn registration_date_is_stable_across_saves() {
        let kv = MemoryStore::new();
        let store = CompanyStore::new(&kv);

        let first = store.save(&sample()).unwrap();

        let mut edited = sample();
        edited.address = "Avenida Central, 99".into();
        let second = store.save(&edited).unwrap();

        assert_eq!(first.registration_date, second.registration_date);
        assert_eq!(store.load().unwrap().address, "Avenida Central, 99");
    }

    #[test]
    fn clear_resets_registration_date() {
        let kv = MemoryStore::new();
        let store = CompanyStore::new(&kv);

        let first = store.save(&sample()).unwrap();
        store.clear().unwrap();
        assert!(!store.exists());
        assert!(store.load().is_none());

        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = store.save(&sample()).unwrap();
        assert_ne!(first.registration_date, second.registration_date);
    }

    #[test]
    fn blank_name_does_not_exist() {
        let kv = MemoryStore::new();
        let store = CompanyStore::new(&kv);

        let mut blank = sample();
        blank.name = "   ".into();
        store.save(&blank).unwrap();

        assert!(store.load().is_some());
        assert!(!store.exists());
    }

    #[test]
    fn corrupt_record_reads_as_none() {
        let kv = MemoryStore::new();
        kv.set(COMPANY_KEY, "{\"name\":").unwrap();
        let store = CompanyStore::new(&kv);

        assert!(store.load().is_none());
        assert!(!store.exists());
    }

    #[test]
    fn save_propagates_storage_failure() {
        let kv = MemoryStore::new();
        kv.set_unavailable(true);
        let store = CompanyStore::new(&kv);

        assert!(store.save(&sample()).is_err());
        assert!(store.load().is_none());
    }
}
