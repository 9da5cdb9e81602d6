use crate::cli::parser::{Commands, EmployeeAction};
use crate::config::Config;
use crate::core::employee::{EmployeeChanges, EmployeeLogic, EmployeeSummary, NewEmployee};
use crate::core::{ask_confirmation, audit, open_store, ready_database};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::utils::date::parse_flexible_date;
use chrono::NaiveDate;

fn admission(s: &str) -> AppResult<NaiveDate> {
    parse_flexible_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Employee { action } = cmd else {
        return Ok(());
    };

    let store = open_store(cfg)?;
    let db = ready_database(&store);

    match action {
        EmployeeAction::Add {
            name,
            sector,
            role,
            ctps,
            admission: date,
            compensation,
        } => {
            let input = NewEmployee {
                sector: sector.clone(),
                name: name.clone(),
                role: role.clone(),
                labor_booklet_number: ctps.clone(),
                admission_date: admission(date)?,
                compensation: compensation.clone(),
            };
            let added = EmployeeLogic::add(&db, input)?;
            audit(&store, "employee_add", added.id(), &added.employee.name);
            success(format!("Employee '{}' added with id {}.", added.employee.name, added.id()));
        }

        EmployeeAction::Edit {
            id,
            name,
            sector,
            role,
            ctps,
            admission: date,
            compensation,
            expect_version,
        } => {
            let changes = EmployeeChanges {
                sector: sector.clone(),
                name: name.clone(),
                role: role.clone(),
                labor_booklet_number: ctps.clone(),
                admission_date: date.as_deref().map(admission).transpose()?,
                compensation: compensation.clone(),
            };
            if changes.is_empty() {
                warning("Nothing to change.");
                return Ok(());
            }

            let edited = EmployeeLogic::edit(&db, id, changes, *expect_version)?;
            audit(
                &store,
                "employee_edit",
                edited.id(),
                &format!("version {}", edited.meta.version),
            );
            success(format!(
                "Employee '{}' updated (version {}).",
                edited.employee.name, edited.meta.version
            ));
        }

        EmployeeAction::Del { id, yes } => {
            let found = EmployeeLogic::find(&db, id)?;
            let prompt = format!(
                "Delete employee '{}' ({})? Saved schedules keep their entries.",
                found.employee.name,
                found.id()
            );
            if !yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            let removed = EmployeeLogic::delete(&db, found.id())?;
            audit(&store, "employee_del", removed.id(), &removed.employee.name);
            success(format!("Employee '{}' deleted.", removed.employee.name));
        }

        EmployeeAction::List { sector } => {
            let employees = EmployeeLogic::list(&db, sector.as_deref())?;
            EmployeeLogic::print_list(&employees);
        }

        EmployeeAction::Summary => {
            let summary = EmployeeSummary::from_employees(db.get_all_employees()?);
            EmployeeLogic::print_summary(&summary);
        }
    }

    Ok(())
}
