//! Unified application error type.
//! All modules (kv, store, database, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use crate::kv::StorageError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage-related
    // ---------------------------
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Database is not ready (state: {0})")]
    NotReady(&'static str),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid day of week: {0}")]
    InvalidDay(String),

    #[error("Invalid time slot: {0}")]
    InvalidSlot(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid backup kind: {0}")]
    InvalidBackupKind(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    #[error("Employee already exists: {0}")]
    DuplicateEmployee(String),

    #[error("Backup not found: {0}")]
    BackupNotFound(String),

    #[error("Company is not registered")]
    CompanyNotRegistered,

    #[error("Version conflict for {id}: expected {expected}, stored {stored}")]
    VersionConflict {
        id: String,
        expected: u64,
        stored: u64,
    },

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
