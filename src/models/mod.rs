pub mod backup;
pub mod company;
pub mod employee;
pub mod schedule;
pub mod sync;
pub mod weekday;

pub use backup::{BackupKind, BackupSnapshot};
pub use company::CompanyRecord;
pub use employee::{EmployeeRecord, LegacyEmployee, StoredEmployee};
pub use schedule::{
    RegistryEntry, ScheduleRecord, ScheduledEmployee, SectorRegistry, SlotMap, StoredSchedule,
};
pub use sync::{SyncMeta, SyncStatus};
pub use weekday::Weekday;
