use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{add_employee, bishop, init_with_company, run_ok, setup_test_db};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init_creates");

    bishop()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_company_set_and_show() {
    let db_path = setup_test_db("company_set_show");
    init_with_company(&db_path);

    bishop()
        .args(["--db", &db_path, "company", "show"])
        .assert()
        .success()
        .stdout(contains("Bishop Bar").and(contains("12.345.678/0001-90")));

    // partial edit keeps the other fields
    run_ok(&db_path, &["company", "set", "--address", "Rua B, 20"]);

    bishop()
        .args(["--db", &db_path, "company", "show"])
        .assert()
        .success()
        .stdout(contains("Rua B, 20").and(contains("Noturno")));
}

#[test]
fn test_company_requires_name_first() {
    let db_path = setup_test_db("company_requires_name");

    bishop()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    bishop()
        .args(["--db", &db_path, "company", "set", "--tax-id", "1"])
        .assert()
        .failure()
        .stderr(contains("Company is not registered"));
}

#[test]
fn test_employee_add_without_company_fails() {
    let db_path = setup_test_db("employee_no_company");

    bishop()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    bishop()
        .args([
            "--db",
            &db_path,
            "employee",
            "add",
            "--name",
            "Ana",
            "--sector",
            "Bar",
            "--role",
            "Garçom",
            "--ctps",
            "1",
            "--admission",
            "2025-03-01",
        ])
        .assert()
        .failure()
        .stderr(contains("Company is not registered"));
}

#[test]
fn test_employee_add_list_edit_del() {
    let db_path = setup_test_db("employee_lifecycle");
    init_with_company(&db_path);

    let ana = add_employee(&db_path, "Ana", "Bar", "Garçom", "01/03/2025");
    add_employee(&db_path, "Caio", "Cozinha", "Cozinheiro", "2024-06-10");

    bishop()
        .args(["--db", &db_path, "employee", "list"])
        .assert()
        .success()
        .stdout(contains("Ana").and(contains("Caio")).and(contains("2025-03-01")));

    bishop()
        .args(["--db", &db_path, "employee", "list", "--sector", "Cozinha"])
        .assert()
        .success()
        .stdout(contains("Caio").and(contains("Ana").not()));

    bishop()
        .args(["--db", &db_path, "employee", "edit", &ana, "--role", "Gerente"])
        .assert()
        .success()
        .stdout(contains("version 2"));

    // stale optimistic token
    bishop()
        .args([
            "--db",
            &db_path,
            "employee",
            "edit",
            &ana,
            "--role",
            "Caixa",
            "--expect-version",
            "1",
        ])
        .assert()
        .failure()
        .stderr(contains("Version conflict"));

    bishop()
        .args(["--db", &db_path, "employee", "del", &ana[..8], "--yes"])
        .assert()
        .success()
        .stdout(contains("deleted"));

    bishop()
        .args(["--db", &db_path, "employee", "list"])
        .assert()
        .success()
        .stdout(contains("Ana").not());
}

#[test]
fn test_employee_summary() {
    let db_path = setup_test_db("employee_summary");
    init_with_company(&db_path);

    add_employee(&db_path, "Ana", "Bar", "Garçom", "2025-03-01");
    add_employee(&db_path, "Bia", "Bar", "Barman", "2025-04-01");
    add_employee(&db_path, "Caio", "Cozinha", "Cozinheiro", "2024-06-10");

    bishop()
        .args(["--db", &db_path, "employee", "summary"])
        .assert()
        .success()
        .stdout(
            contains("Total")
                .and(contains("Recent admissions"))
                .and(contains("2025-04-01  Bia")),
        );
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("log_records");
    init_with_company(&db_path);
    add_employee(&db_path, "Ana", "Bar", "Garçom", "2025-03-01");

    bishop()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(
            contains("init")
                .and(contains("company_set"))
                .and(contains("employee_add"))
                .and(contains("migration_applied")),
        );
}
