use crate::database::{Database, ImportSummary};
use crate::errors::AppResult;
use crate::export::{notify_export_success, read_document, write_document};
use crate::kv::KvStore;
use std::path::{Path, PathBuf};

pub struct ExportLogic;

impl ExportLogic {
    /// Write the full export document (company, employees, schedules,
    /// registry) to `path`.
    pub fn export<S: KvStore + ?Sized>(
        db: &Database<'_, S>,
        path: &Path,
        force: bool,
        compress: bool,
    ) -> AppResult<PathBuf> {
        let json = db.export_data()?;
        let written = write_document(path, &json, force, compress)?;
        notify_export_success("JSON", &written);
        Ok(written)
    }

    /// Load an export document (plain or zipped) into the store.
    pub fn import<S: KvStore + ?Sized>(
        db: &Database<'_, S>,
        path: &Path,
    ) -> AppResult<ImportSummary> {
        let json = read_document(path)?;
        db.import_data(&json)
    }
}
