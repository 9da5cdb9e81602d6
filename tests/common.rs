#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn bishop() -> Command {
    cargo_bin_cmd!("bishop")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_bishop.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Run `bishop --db <db> <args>` and return stdout; the command must succeed.
pub fn run_ok(db_path: &str, args: &[&str]) -> String {
    let output = bishop()
        .args(["--db", db_path])
        .args(args)
        .output()
        .expect("run bishop");
    assert!(
        output.status.success(),
        "bishop {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Initialize the DB and register a company.
pub fn init_with_company(db_path: &str) {
    bishop()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    run_ok(
        db_path,
        &[
            "company",
            "set",
            "--name",
            "Bishop Bar",
            "--tax-id",
            "12.345.678/0001-90",
            "--address",
            "Rua A, 10",
            "--period",
            "Noturno",
            "--activity",
            "Bar",
        ],
    );
}

/// Add an employee through the CLI and return its id.
pub fn add_employee(db_path: &str, name: &str, sector: &str, role: &str, admission: &str) -> String {
    let out = run_ok(
        db_path,
        &[
            "employee",
            "add",
            "--name",
            name,
            "--sector",
            sector,
            "--role",
            role,
            "--ctps",
            "123456",
            "--admission",
            admission,
        ],
    );

    out.split("with id ")
        .nth(1)
        .and_then(|rest| rest.split('.').next())
        .map(|id| id.trim().to_string())
        .expect("employee id in output")
}
