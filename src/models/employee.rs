use crate::errors::{AppError, AppResult};
use crate::models::company::CompanyRecord;
use crate::models::sync::SyncMeta;
use crate::utils::date::parse_flexible_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered employee.
///
/// Company fields are copied from the company record when the employee is
/// registered; later company edits do not touch them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub id: String,
    pub company_name: String,
    pub tax_id: String,
    pub address: String,
    pub operating_period: String,
    pub primary_activity: String,
    pub sector: String,
    pub name: String,
    pub role: String,
    /// CTPS number.
    pub labor_booklet_number: String,
    pub admission_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compensation: Option<String>,
}

impl EmployeeRecord {
    pub fn new_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// New employee of `company` with a freshly generated id.
    pub fn for_company(
        company: &CompanyRecord,
        sector: &str,
        name: &str,
        role: &str,
        labor_booklet_number: &str,
        admission_date: NaiveDate,
    ) -> Self {
        Self {
            id: Self::new_id(),
            company_name: company.name.clone(),
            tax_id: company.tax_id.clone(),
            address: company.address.clone(),
            operating_period: company.operating_period.clone(),
            primary_activity: company.primary_activity.clone(),
            sector: sector.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            labor_booklet_number: labor_booklet_number.to_string(),
            admission_date,
            compensation: None,
        }
    }
}

/// Employee as persisted by the database façade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEmployee {
    #[serde(flatten)]
    pub employee: EmployeeRecord,
    #[serde(flatten)]
    pub meta: SyncMeta,
}

impl StoredEmployee {
    pub fn id(&self) -> &str {
        &self.employee.id
    }
}

/// Shape of one entry of the pre-migration `bishop_employees` list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyEmployee {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub cnpj: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub activity: String,
    pub sector: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub ctps: String,
    pub admission_date: String,
    #[serde(default)]
    pub remuneracao: Option<String>,
}

impl LegacyEmployee {
    /// Give an id-less entry an id derived from its list position and raw
    /// JSON, so every scan of the same list yields the same id.
    pub fn with_stable_id(mut self, index: usize, raw: &str) -> Self {
        if self.id.trim().is_empty() {
            let name = format!("{index}:{raw}");
            self.id = uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, name.as_bytes()).to_string();
        }
        self
    }
}

impl TryFrom<LegacyEmployee> for EmployeeRecord {
    type Error = AppError;

    fn try_from(old: LegacyEmployee) -> AppResult<Self> {
        let admission_date = parse_flexible_date(&old.admission_date)
            .ok_or_else(|| AppError::InvalidDate(old.admission_date.clone()))?;

        let id = if old.id.trim().is_empty() {
            EmployeeRecord::new_id()
        } else {
            old.id
        };

        Ok(Self {
            id,
            company_name: old.company_name,
            tax_id: old.cnpj,
            address: old.address,
            operating_period: old.period,
            primary_activity: old.activity,
            sector: old.sector,
            name: old.name,
            role: old.role,
            labor_booklet_number: old.ctps,
            admission_date,
            compensation: old.remuneracao.filter(|r| !r.trim().is_empty()),
        })
    }
}
