//! Record stores layered over a `KvStore`.

pub mod company;
pub mod schedule;

pub use company::{COMPANY_KEY, CompanyStore};
pub use schedule::{
    LEGACY_SCHEDULE_KEYS, ScheduleDocument, ScheduleKeys, ScheduleStorageInfo, ScheduleStore,
};
