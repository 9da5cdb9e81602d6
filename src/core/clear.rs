use crate::database::{ClearOutcome, Database, ScheduleClearance};
use crate::errors::AppResult;
use crate::kv::KvStore;
use crate::ui::messages::{info, success, warning};

pub struct ClearLogic;

impl ClearLogic {
    pub fn apply<S: KvStore + ?Sized>(db: &Database<'_, S>) -> AppResult<ClearOutcome> {
        db.clear_all_data()
    }

    pub fn report(outcome: &ClearOutcome) {
        match &outcome.backup_id {
            Some(id) => info(format!("Backup {id} taken before clearing.")),
            None => warning("No backup could be taken before clearing."),
        }

        success(format!("{} employee(s) removed.", outcome.employees_removed));

        match outcome.schedules {
            ScheduleClearance::NotImplemented { retained } => warning(format!(
                "Schedules are not cleared: {retained} schedule(s) kept."
            )),
        }
    }
}
