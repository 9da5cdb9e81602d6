use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{add_employee, bishop, init_with_company, run_ok, setup_test_db, temp_out};

#[test]
fn test_export_then_import_into_fresh_db() {
    let db_path = setup_test_db("export_import_src");
    init_with_company(&db_path);
    let ana = add_employee(&db_path, "Ana", "Bar", "Garçom", "2025-03-01");
    run_ok(
        &db_path,
        &[
            "schedule", "mark", "--sector", "Bar", "--day", "monday", "--employee", &ana,
            "18:00-22:00",
        ],
    );

    let out = temp_out("export_import", "json");
    bishop()
        .args(["--db", &db_path, "export", "--file", &out])
        .assert()
        .success()
        .stdout(contains("export completed"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["company"]["name"], "Bishop Bar");
    assert_eq!(json["employees"][0]["name"], "Ana");

    let target = setup_test_db("export_import_dst");
    bishop()
        .args(["--db", &target, "--test", "init"])
        .assert()
        .success();

    bishop()
        .args(["--db", &target, "import", "--file", &out])
        .assert()
        .success()
        .stdout(contains("1 employee(s), 1 schedule(s), company"));

    bishop()
        .args(["--db", &target, "employee", "list"])
        .assert()
        .success()
        .stdout(contains("Ana"));
}

#[test]
fn test_export_refuses_existing_file_without_force() {
    let db_path = setup_test_db("export_existing");
    init_with_company(&db_path);

    let out = temp_out("export_existing", "json");
    fs::write(&out, "keep me").unwrap();

    bishop()
        .args(["--db", &db_path, "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure();
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    bishop()
        .args(["--db", &db_path, "export", "--file", &out, "--force"])
        .assert()
        .success();
    assert_ne!(fs::read_to_string(&out).unwrap(), "keep me");
}

#[test]
fn test_backup_list_and_restore() {
    let db_path = setup_test_db("backup_restore");
    init_with_company(&db_path);
    let ana = add_employee(&db_path, "Ana", "Bar", "Garçom", "2025-03-01");

    let out = run_ok(&db_path, &["backup", "--kind", "auto"]);
    let id = out
        .split("Backup ")
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .expect("backup id")
        .to_string();

    bishop()
        .args(["--db", &db_path, "backup", "--list"])
        .assert()
        .success()
        .stdout(contains(id.as_str()).and(contains("auto")));

    run_ok(&db_path, &["employee", "del", &ana, "--yes"]);

    bishop()
        .args(["--db", &db_path, "backup", "--restore", &id])
        .assert()
        .success()
        .stdout(contains("1 employee(s)"));

    bishop()
        .args(["--db", &db_path, "employee", "list"])
        .assert()
        .success()
        .stdout(contains("Ana"));

    bishop()
        .args(["--db", &db_path, "backup", "--restore", "nope"])
        .assert()
        .failure()
        .stderr(contains("Backup not found"));
}

#[test]
fn test_backup_to_compressed_file() {
    let db_path = setup_test_db("backup_zip");
    init_with_company(&db_path);

    let out = temp_out("backup_zip", "json");
    let zip = out.replace(".json", ".zip");
    fs::remove_file(&zip).ok();

    bishop()
        .args(["--db", &db_path, "backup", "--file", &out, "--compress"])
        .assert()
        .success();

    assert!(std::path::Path::new(&zip).exists());
    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_clear_keeps_schedules_and_takes_backup() {
    let db_path = setup_test_db("clear_all");
    init_with_company(&db_path);
    let ana = add_employee(&db_path, "Ana", "Bar", "Garçom", "2025-03-01");
    run_ok(
        &db_path,
        &[
            "schedule", "mark", "--sector", "Bar", "--day", "monday", "--employee", &ana, "18:00",
        ],
    );

    bishop()
        .args(["--db", &db_path, "clear", "--yes"])
        .assert()
        .success()
        .stdout(
            contains("1 employee(s) removed")
                .and(contains("taken before clearing"))
                .and(contains("1 schedule(s) kept")),
        );

    bishop()
        .args(["--db", &db_path, "info"])
        .assert()
        .success()
        .stdout(contains("Backups:").and(contains("Schedules:")));
}

#[test]
fn test_clear_cancelled_without_confirmation() {
    let db_path = setup_test_db("clear_cancel");
    init_with_company(&db_path);
    add_employee(&db_path, "Ana", "Bar", "Garçom", "2025-03-01");

    bishop()
        .args(["--db", &db_path, "clear"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("cancelled"));

    bishop()
        .args(["--db", &db_path, "employee", "list"])
        .assert()
        .success()
        .stdout(contains("Ana"));
}

#[test]
fn test_sync_lists_pending_records() {
    let db_path = setup_test_db("sync_pending");
    init_with_company(&db_path);

    bishop()
        .args(["--db", &db_path, "sync"])
        .assert()
        .success()
        .stdout(contains("Nothing waiting"));

    add_employee(&db_path, "Ana", "Bar", "Garçom", "2025-03-01");

    bishop()
        .args(["--db", &db_path, "sync"])
        .assert()
        .success()
        .stdout(contains("Ana (Bar)").and(contains("1 employee(s), 0 schedule(s) pending")));
}
