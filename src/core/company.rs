use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::kv::KvStore;
use crate::models::CompanyRecord;
use crate::ui::messages::{field, header, info};

/// Fields given on the command line; `None` keeps the stored value.
#[derive(Debug, Default, Clone)]
pub struct CompanyFields {
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub operating_period: Option<String>,
    pub primary_activity: Option<String>,
}

impl CompanyFields {
    /// Overlay the given fields on `current`. A first registration needs a name.
    pub fn merge(self, current: Option<CompanyRecord>) -> AppResult<CompanyRecord> {
        let mut record = match current {
            Some(c) => c,
            None => {
                let name = self.name.clone().unwrap_or_default();
                CompanyRecord::new(&name, "", "", "", "")
            }
        };

        if let Some(v) = self.name {
            record.name = v;
        }
        if let Some(v) = self.tax_id {
            record.tax_id = v;
        }
        if let Some(v) = self.address {
            record.address = v;
        }
        if let Some(v) = self.operating_period {
            record.operating_period = v;
        }
        if let Some(v) = self.primary_activity {
            record.primary_activity = v;
        }

        if !record.is_registered() {
            return Err(AppError::CompanyNotRegistered);
        }
        Ok(record)
    }
}

pub struct CompanyLogic;

impl CompanyLogic {
    pub fn set<S: KvStore + ?Sized>(
        db: &Database<'_, S>,
        fields: CompanyFields,
    ) -> AppResult<CompanyRecord> {
        let store = db.company();
        let record = fields.merge(store.load())?;
        store.save(&record)
    }

    pub fn show<S: KvStore + ?Sized>(db: &Database<'_, S>) -> AppResult<()> {
        let Some(c) = db.company().load().filter(|c| c.is_registered()) else {
            info("No company registered. Use `bishop company set --name <NAME>`.");
            return Ok(());
        };

        header(&c.name);
        field("Tax id", &c.tax_id);
        field("Address", &c.address);
        field("Operating period", &c.operating_period);
        field("Primary activity", &c.primary_activity);
        if let Some(d) = c.registration_date {
            field("Registered", d.format("%Y-%m-%d %H:%M UTC"));
        }
        Ok(())
    }

    pub fn clear<S: KvStore + ?Sized>(db: &Database<'_, S>) -> AppResult<()> {
        db.company().clear()
    }
}
