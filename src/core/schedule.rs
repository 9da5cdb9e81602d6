use crate::core::employee::EmployeeLogic;
use crate::database::{DB_SCHEDULE_KEYS, Database};
use crate::errors::{AppError, AppResult};
use crate::kv::KvStore;
use crate::models::{ScheduleRecord, ScheduledEmployee, SectorRegistry, StoredSchedule, Weekday};
use crate::store::{ScheduleStorageInfo, ScheduleStore};
use crate::ui::messages::{field, header, info};
use crate::utils::colors::{colorize_hours, slot_cell};
use crate::utils::table::Table;
use crate::utils::time::{format_total_minutes, parse_slot, slot_range, time_slots};
use chrono::Utc;

/// Shifts longer than this are highlighted.
const LONG_SHIFT_HOURS: f64 = 10.0;

/// Expand "HH:MM" and "HH:MM-HH:MM" (end exclusive) into slot labels.
pub fn expand_slots(specs: &[String]) -> AppResult<Vec<String>> {
    let mut slots = Vec::new();
    for spec in specs {
        for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.split_once('-') {
                Some((from, to)) => slots.extend(slot_range(from, to)?),
                None => slots.push(parse_slot(part)?),
            }
        }
    }

    if slots.is_empty() {
        return Err(AppError::InvalidSlot(specs.join(",")));
    }
    slots.dedup();
    Ok(slots)
}

pub struct ScheduleLogic;

impl ScheduleLogic {
    /// Mark (or unmark) slots of one employee in a sector's day and save it.
    pub fn mark<S: KvStore + ?Sized>(
        db: &Database<'_, S>,
        sector: &str,
        day: Weekday,
        employee_id: &str,
        slots: &[String],
        unmark: bool,
    ) -> AppResult<StoredSchedule> {
        let employee = EmployeeLogic::find(db, employee_id)?;

        let mut record = db
            .load_schedule(sector, day)?
            .map(|s| s.record)
            .unwrap_or_else(|| ScheduleRecord::new(sector, day));

        if record.employee(employee.id()).is_none() {
            record.employees.push(ScheduledEmployee::blank(
                employee.id(),
                &employee.employee.name,
                &employee.employee.role,
                &employee.employee.sector,
            ));
        }

        if let Some(entry) = record.employee_mut(employee.id()) {
            for slot in slots {
                entry.schedule.insert(slot.clone(), !unmark);
            }
        }
        record.saved_at = Utc::now();
        record.auto_saved = false;

        if !db.save_schedule(record)? {
            return Err(AppError::Other(format!(
                "schedule {sector}/{day} could not be saved"
            )));
        }

        db.load_schedule(sector, day)?
            .ok_or_else(|| AppError::Other(format!("schedule {sector}/{day} vanished")))
    }

    pub fn show<S: KvStore + ?Sized>(
        db: &Database<'_, S>,
        sector: &str,
        day: Weekday,
        grid: bool,
    ) -> AppResult<()> {
        let Some(stored) = db.load_schedule(sector, day)? else {
            info(format!("No schedule saved for {sector} on {day}."));
            return Ok(());
        };
        let record = &stored.record;

        header(format!("{} - {}", record.sector, record.day));
        field("Saved at", record.saved_at.format("%Y-%m-%d %H:%M UTC"));
        field("Version", stored.meta.version);
        field("Sync", stored.meta.sync_status);
        println!();

        let mut table = Table::new(["Employee", "Role", "Start", "End", "Slots", "Hours"]);
        for e in &record.employees {
            let (start, end) = match e.span() {
                Some(span) => (span.start, span.end),
                None => ("--:--".to_string(), "--:--".to_string()),
            };
            table.add_row(vec![
                e.name.clone(),
                e.role.clone(),
                start,
                end,
                e.marked_slots().to_string(),
                colorize_hours(e.worked_hours(), LONG_SHIFT_HOURS),
            ]);
        }
        print!("{}", table.render());
        let total = record.total_hours();
        println!(
            "\nTotal: {total:.1}h ({})",
            format_total_minutes((total * 60.0).round() as u32)
        );

        if grid {
            println!();
            Self::print_grid(record);
        }
        Ok(())
    }

    fn print_grid(record: &ScheduleRecord) {
        let slots = time_slots();
        let width = record
            .employees
            .iter()
            .map(|e| e.name.chars().count())
            .max()
            .unwrap_or(0);

        let hours: String = slots
            .iter()
            .step_by(2)
            .map(|s| format!("{:<2}", &s[..2]))
            .collect();
        println!("{:width$}  {hours}", "");

        for e in &record.employees {
            let row: String = slots
                .iter()
                .map(|s| slot_cell(e.schedule.get(s).copied().unwrap_or(false)))
                .collect();
            println!("{:<width$}  {row}", e.name);
        }
    }

    pub fn registry<S: KvStore + ?Sized>(db: &Database<'_, S>) -> AppResult<SectorRegistry> {
        db.schedule_registry()
    }

    /// Registry recomputed from the saved schedules themselves.
    pub fn rebuilt_registry<S: KvStore + ?Sized>(kv: &S) -> SectorRegistry {
        ScheduleStore::<S, StoredSchedule>::with_keys(kv, DB_SCHEDULE_KEYS).rebuild_registry()
    }

    pub fn print_registry(registry: &SectorRegistry) {
        if registry.is_empty() {
            info("No schedules saved.");
            return;
        }

        let mut table = Table::new(["Sector", "Day", "Employees", "Saved at"]);
        for (sector, days) in registry {
            for (day, entry) in days {
                table.add_row(vec![
                    sector.clone(),
                    day.to_string(),
                    entry.employee_count.to_string(),
                    entry.saved_at.format("%Y-%m-%d %H:%M").to_string(),
                ]);
            }
        }
        print!("{}", table.render());
    }

    /// Figures about schedule copies still held in the pre-migration layout.
    pub fn legacy_info<S: KvStore + ?Sized>(kv: &S) -> ScheduleStorageInfo {
        ScheduleStore::legacy(kv).storage_info()
    }

    /// Drop the pre-migration schedule copies. Façade schedules are untouched.
    pub fn clear_legacy<S: KvStore + ?Sized>(kv: &S) -> AppResult<usize> {
        let store = ScheduleStore::legacy(kv);
        let count = store.storage_info().total_schedules;
        if !store.clear_all() {
            return Err(AppError::Other(
                "legacy schedules could not be cleared".to_string(),
            ));
        }
        Ok(count)
    }

    /// Schedule-only export document of the current (or legacy) layout.
    pub fn export_json<S: KvStore + ?Sized>(kv: &S, legacy: bool) -> AppResult<String> {
        let json = if legacy {
            ScheduleStore::legacy(kv).export()
        } else {
            ScheduleStore::<S, StoredSchedule>::with_keys(kv, DB_SCHEDULE_KEYS).export()
        };

        if json.is_empty() {
            return Err(AppError::Export("schedules could not be serialized".to_string()));
        }
        Ok(json)
    }
}
