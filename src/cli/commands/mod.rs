pub mod backup;
pub mod clear;
pub mod company;
pub mod employee;
pub mod export;
pub mod import;
pub mod info;
pub mod init;
pub mod log;
pub mod schedule;
pub mod sync;
