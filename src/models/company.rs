use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single company registered in an installation.
///
/// Older installations wrote `cnpj`, `period` and `activity`; those names are
/// still accepted on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub name: String,
    #[serde(alias = "cnpj")]
    pub tax_id: String,
    pub address: String,
    #[serde(alias = "period")]
    pub operating_period: String,
    #[serde(alias = "activity")]
    pub primary_activity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<DateTime<Utc>>,
}

impl CompanyRecord {
    pub fn new(
        name: &str,
        tax_id: &str,
        address: &str,
        operating_period: &str,
        primary_activity: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            tax_id: tax_id.to_string(),
            address: address.to_string(),
            operating_period: operating_period.to_string(),
            primary_activity: primary_activity.to_string(),
            registration_date: None,
        }
    }

    /// A record with a blank name counts as "not registered".
    pub fn is_registered(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
