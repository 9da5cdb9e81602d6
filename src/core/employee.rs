use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::kv::KvStore;
use crate::models::{EmployeeRecord, StoredEmployee};
use crate::ui::messages::{field, header, info};
use crate::utils::table::Table;
use chrono::NaiveDate;
use std::collections::BTreeMap;

const RECENT_ADMISSIONS: usize = 5;

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub sector: String,
    pub name: String,
    pub role: String,
    pub labor_booklet_number: String,
    pub admission_date: NaiveDate,
    pub compensation: Option<String>,
}

/// Changes for `employee edit`; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct EmployeeChanges {
    pub sector: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub labor_booklet_number: Option<String>,
    pub admission_date: Option<NaiveDate>,
    pub compensation: Option<String>,
}

impl EmployeeChanges {
    pub fn is_empty(&self) -> bool {
        self.sector.is_none()
            && self.name.is_none()
            && self.role.is_none()
            && self.labor_booklet_number.is_none()
            && self.admission_date.is_none()
            && self.compensation.is_none()
    }

    fn apply(self, e: &mut EmployeeRecord) {
        if let Some(v) = self.sector {
            e.sector = v;
        }
        if let Some(v) = self.name {
            e.name = v;
        }
        if let Some(v) = self.role {
            e.role = v;
        }
        if let Some(v) = self.labor_booklet_number {
            e.labor_booklet_number = v;
        }
        if let Some(v) = self.admission_date {
            e.admission_date = v;
        }
        if let Some(v) = self.compensation {
            e.compensation = Some(v).filter(|c| !c.trim().is_empty());
        }
    }
}

/// Headcount figures for the employee overview.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmployeeSummary {
    pub total: usize,
    pub by_sector: BTreeMap<String, usize>,
    pub by_role: BTreeMap<String, usize>,
    /// Most recent admissions first.
    pub recent: Vec<StoredEmployee>,
}

impl EmployeeSummary {
    pub fn from_employees(mut employees: Vec<StoredEmployee>) -> Self {
        let mut summary = EmployeeSummary {
            total: employees.len(),
            ..Default::default()
        };

        for e in &employees {
            *summary.by_sector.entry(e.employee.sector.clone()).or_default() += 1;
            *summary.by_role.entry(e.employee.role.clone()).or_default() += 1;
        }

        employees.sort_by(|a, b| {
            b.employee
                .admission_date
                .cmp(&a.employee.admission_date)
                .then_with(|| a.employee.name.cmp(&b.employee.name))
        });
        employees.truncate(RECENT_ADMISSIONS);
        summary.recent = employees;

        summary
    }
}

pub struct EmployeeLogic;

impl EmployeeLogic {
    /// Register an employee under the stored company.
    pub fn add<S: KvStore + ?Sized>(
        db: &Database<'_, S>,
        input: NewEmployee,
    ) -> AppResult<StoredEmployee> {
        let company = db
            .company()
            .load()
            .filter(|c| c.is_registered())
            .ok_or(AppError::CompanyNotRegistered)?;

        let mut record = EmployeeRecord::for_company(
            &company,
            &input.sector,
            &input.name,
            &input.role,
            &input.labor_booklet_number,
            input.admission_date,
        );
        record.compensation = input.compensation.filter(|c| !c.trim().is_empty());

        db.add_employee(record)
    }

    /// Exact id, or a prefix matching exactly one employee.
    pub fn find<S: KvStore + ?Sized>(
        db: &Database<'_, S>,
        id: &str,
    ) -> AppResult<StoredEmployee> {
        if let Some(found) = db.get_employee(id)? {
            return Ok(found);
        }

        let mut matches: Vec<StoredEmployee> = db
            .get_all_employees()?
            .into_iter()
            .filter(|e| e.id().starts_with(id))
            .collect();

        match matches.len() {
            1 => Ok(matches.remove(0)),
            _ => Err(AppError::EmployeeNotFound(id.to_string())),
        }
    }

    pub fn edit<S: KvStore + ?Sized>(
        db: &Database<'_, S>,
        id: &str,
        changes: EmployeeChanges,
        expected_version: Option<u64>,
    ) -> AppResult<StoredEmployee> {
        let mut current = Self::find(db, id)?;
        changes.apply(&mut current.employee);

        match expected_version {
            Some(v) => db.update_employee_expecting(current, v),
            None => db.update_employee(current),
        }
    }

    /// Delete by id or unique prefix; returns the removed record.
    pub fn delete<S: KvStore + ?Sized>(
        db: &Database<'_, S>,
        id: &str,
    ) -> AppResult<StoredEmployee> {
        let found = Self::find(db, id)?;
        db.delete_employee(found.id())?;
        Ok(found)
    }

    /// Employees sorted by sector then name, optionally of one sector.
    pub fn list<S: KvStore + ?Sized>(
        db: &Database<'_, S>,
        sector: Option<&str>,
    ) -> AppResult<Vec<StoredEmployee>> {
        let mut employees: Vec<StoredEmployee> = db
            .get_all_employees()?
            .into_iter()
            .filter(|e| sector.is_none_or(|s| e.employee.sector.eq_ignore_ascii_case(s)))
            .collect();

        employees.sort_by(|a, b| {
            (&a.employee.sector, &a.employee.name).cmp(&(&b.employee.sector, &b.employee.name))
        });
        Ok(employees)
    }

    pub fn print_list(employees: &[StoredEmployee]) {
        if employees.is_empty() {
            info("No employees registered.");
            return;
        }

        let mut table = Table::new(["Id", "Name", "Sector", "Role", "Admission", "Ver", "Sync"]);
        for e in employees {
            table.add_row(vec![
                e.id().chars().take(8).collect(),
                e.employee.name.clone(),
                e.employee.sector.clone(),
                e.employee.role.clone(),
                e.employee.admission_date.to_string(),
                e.meta.version.to_string(),
                e.meta.sync_status.to_string(),
            ]);
        }
        print!("{}", table.render());
    }

    pub fn print_summary(summary: &EmployeeSummary) {
        header("Employees");
        field("Total", summary.total);
        field("Sectors", summary.by_sector.len());
        field("Roles", summary.by_role.len());

        if summary.total == 0 {
            return;
        }

        println!();
        let mut sectors = Table::new(["Sector", "Employees"]);
        for (s, n) in &summary.by_sector {
            sectors.add_row(vec![s.clone(), n.to_string()]);
        }
        print!("{}", sectors.render());

        println!();
        let mut roles = Table::new(["Role", "Employees"]);
        for (r, n) in &summary.by_role {
            roles.add_row(vec![r.clone(), n.to_string()]);
        }
        print!("{}", roles.render());

        println!("\nRecent admissions:");
        for e in &summary.recent {
            println!(
                "  {}  {} ({}, {})",
                e.employee.admission_date, e.employee.name, e.employee.role, e.employee.sector
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use crate::models::CompanyRecord;

    fn input(name: &str, sector: &str, role: &str, admitted: (i32, u32, u32)) -> NewEmployee {
        NewEmployee {
            sector: sector.into(),
            name: name.into(),
            role: role.into(),
            labor_booklet_number: "1".into(),
            admission_date: NaiveDate::from_ymd_opt(admitted.0, admitted.1, admitted.2).unwrap(),
            compensation: None,
        }
    }

    fn ready(kv: &MemoryStore) -> Database<'_, MemoryStore> {
        let mut db = Database::new(kv);
        db.initialize();
        db.company()
            .save(&CompanyRecord::new("Bishop", "1", "Rua A", "Noturno", "Bar"))
            .unwrap();
        db
    }

    #[test]
    fn add_requires_registered_company() {
        let kv = MemoryStore::new();
        let mut db = Database::new(&kv);
        db.initialize();

        let result = EmployeeLogic::add(&db, input("Ana", "Bar", "Garçom", (2025, 1, 1)));
        assert!(matches!(result, Err(AppError::CompanyNotRegistered)));
    }

    #[test]
    fn add_copies_company_fields() {
        let kv = MemoryStore::new();
        let db = ready(&kv);

        let e = EmployeeLogic::add(&db, input("Ana", "Bar", "Garçom", (2025, 1, 1))).unwrap();
        assert_eq!(e.employee.company_name, "Bishop");
        assert_eq!(e.employee.operating_period, "Noturno");
    }

    #[test]
    fn find_accepts_unique_prefix() {
        let kv = MemoryStore::new();
        let db = ready(&kv);
        let e = EmployeeLogic::add(&db, input("Ana", "Bar", "Garçom", (2025, 1, 1))).unwrap();

        let found = EmployeeLogic::find(&db, &e.id()[..8]).unwrap();
        assert_eq!(found.id(), e.id());
        assert!(matches!(
            EmployeeLogic::find(&db, "zzzz"),
            Err(AppError::EmployeeNotFound(_))
        ));
    }

    #[test]
    fn edit_bumps_version_and_checks_expected() {
        let kv = MemoryStore::new();
        let db = ready(&kv);
        let e = EmployeeLogic::add(&db, input("Ana", "Bar", "Garçom", (2025, 1, 1))).unwrap();

        let changes = EmployeeChanges {
            role: Some("Gerente".into()),
            ..Default::default()
        };
        let edited = EmployeeLogic::edit(&db, e.id(), changes.clone(), None).unwrap();
        assert_eq!(edited.meta.version, 2);
        assert_eq!(edited.employee.role, "Gerente");

        let stale = EmployeeLogic::edit(&db, e.id(), changes, Some(1));
        assert!(matches!(stale, Err(AppError::VersionConflict { .. })));
    }

    #[test]
    fn summary_counts_and_recent_admissions() {
        let kv = MemoryStore::new();
        let db = ready(&kv);
        let people = [
            ("Ana", "Bar", "Garçom", (2024, 1, 10)),
            ("Bia", "Bar", "Barman", (2025, 2, 1)),
            ("Caio", "Cozinha", "Cozinheiro", (2023, 5, 5)),
            ("Duda", "Cozinha", "Cozinheiro", (2025, 6, 1)),
            ("Enzo", "Salão", "Garçom", (2022, 1, 1)),
            ("Fabi", "Salão", "Garçom", (2025, 7, 7)),
        ];
        for (n, s, r, d) in people {
            EmployeeLogic::add(&db, input(n, s, r, d)).unwrap();
        }

        let summary = EmployeeSummary::from_employees(db.get_all_employees().unwrap());

        assert_eq!(summary.total, 6);
        assert_eq!(summary.by_sector["Bar"], 2);
        assert_eq!(summary.by_role["Garçom"], 3);
        assert_eq!(summary.recent.len(), 5);
        assert_eq!(summary.recent[0].employee.name, "Fabi");
        assert!(summary.recent.iter().all(|e| e.employee.name != "Enzo"));
    }

    #[test]
    fn list_filters_by_sector() {
        let kv = MemoryStore::new();
        let db = ready(&kv);
        EmployeeLogic::add(&db, input("Ana", "Bar", "Garçom", (2024, 1, 10))).unwrap();
        EmployeeLogic::add(&db, input("Caio", "Cozinha", "Cozinheiro", (2023, 5, 5))).unwrap();

        let bar = EmployeeLogic::list(&db, Some("bar")).unwrap();
        assert_eq!(bar.len(), 1);
        assert_eq!(bar[0].employee.name, "Ana");
        assert_eq!(EmployeeLogic::list(&db, None).unwrap().len(), 2);
    }
}
