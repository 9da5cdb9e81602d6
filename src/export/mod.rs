// src/export/mod.rs

mod document;
mod fs_utils;

pub use document::{EXPORT_VERSION, FullExport, ScheduleExport};

use crate::errors::AppResult;
use crate::ui::messages::success;
use std::path::{Path, PathBuf};

/// Common completion message for file exports.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

/// Write a JSON document to disk, optionally zipped. Returns the final path.
pub fn write_document(path: &Path, json: &str, force: bool, compress: bool) -> AppResult<PathBuf> {
    fs_utils::ensure_writable(path, force)?;
    fs_utils::write_text(path, json)?;

    if compress {
        fs_utils::compress_file(path)
    } else {
        Ok(path.to_path_buf())
    }
}

/// Read a document written by `write_document`, zipped or not.
pub fn read_document(path: &Path) -> AppResult<String> {
    fs_utils::read_text(path)
}
