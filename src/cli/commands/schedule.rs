use crate::cli::parser::{Commands, ScheduleAction};
use crate::config::Config;
use crate::core::schedule::{ScheduleLogic, expand_slots};
use crate::core::{ask_confirmation, audit, open_store, ready_database};
use crate::errors::AppResult;
use crate::export::{notify_export_success, write_document};
use crate::models::Weekday;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Schedule { action } = cmd else {
        return Ok(());
    };

    let store = open_store(cfg)?;
    let db = ready_database(&store);

    match action {
        ScheduleAction::Mark {
            sector,
            day,
            employee,
            slots,
            unmark,
        } => {
            let day: Weekday = day.parse()?;
            let slots = expand_slots(slots)?;
            let saved = ScheduleLogic::mark(&db, sector, day, employee, &slots, *unmark)?;

            let hours = saved
                .record
                .employees
                .iter()
                .find(|e| e.id.starts_with(employee.as_str()))
                .map_or(0.0, |e| e.worked_hours());

            audit(
                &store,
                "schedule_mark",
                &format!("{sector}/{day}"),
                &format!("{} slot(s), version {}", slots.len(), saved.meta.version),
            );
            success(format!(
                "{sector} on {day}: {} slot(s) {}, employee total {hours:.1}h.",
                slots.len(),
                if *unmark { "cleared" } else { "marked" }
            ));
        }

        ScheduleAction::Show { sector, day, grid } => {
            ScheduleLogic::show(&db, sector, day.parse()?, *grid)?;
        }

        ScheduleAction::List { rebuild } => {
            let registry = if *rebuild {
                ScheduleLogic::rebuilt_registry(&store)
            } else {
                ScheduleLogic::registry(&db)?
            };
            ScheduleLogic::print_registry(&registry);
        }

        ScheduleAction::Export {
            file,
            legacy,
            force,
        } => {
            let json = ScheduleLogic::export_json(&store, *legacy)?;
            let written = write_document(&cfg.output_path(file), &json, *force, false)?;
            notify_export_success("Schedule", &written);
        }

        ScheduleAction::Clear { yes } => {
            let legacy = ScheduleLogic::legacy_info(&store);
            if legacy.total_schedules == 0 {
                info("No schedule copies left in the previous storage layout.");
                return Ok(());
            }

            let prompt = format!(
                "Remove {} schedule copy(ies) of the previous storage layout?",
                legacy.total_schedules
            );
            if !yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            let removed = ScheduleLogic::clear_legacy(&store)?;
            audit(&store, "schedule_clear", "legacy", &format!("{removed} removed"));
            success(format!("{removed} legacy schedule copy(ies) removed."));
        }
    }

    Ok(())
}
