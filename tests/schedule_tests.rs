use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{add_employee, bishop, init_with_company, run_ok, setup_test_db, temp_out};

#[test]
fn test_mark_and_show_night_shift() {
    let db_path = setup_test_db("schedule_night_shift");
    init_with_company(&db_path);
    let ana = add_employee(&db_path, "Ana", "Bar", "Garçom", "2025-03-01");

    bishop()
        .args([
            "--db",
            &db_path,
            "schedule",
            "mark",
            "--sector",
            "Bar",
            "--day",
            "sexta-feira",
            "--employee",
            &ana,
            "22:00-02:00",
        ])
        .assert()
        .success()
        .stdout(contains("8 slot(s) marked").and(contains("4.0h")));

    bishop()
        .args([
            "--db", &db_path, "schedule", "show", "--sector", "Bar", "--day", "SEXTA-FEIRA",
        ])
        .assert()
        .success()
        .stdout(
            contains("Ana")
                .and(contains("22:00"))
                .and(contains("02:00"))
                .and(contains("Total: 4.0h")),
        );
}

#[test]
fn test_unmark_bumps_version() {
    let db_path = setup_test_db("schedule_unmark");
    init_with_company(&db_path);
    let ana = add_employee(&db_path, "Ana", "Bar", "Garçom", "2025-03-01");

    run_ok(
        &db_path,
        &[
            "schedule", "mark", "--sector", "Bar", "--day", "monday", "--employee", &ana,
            "18:00-20:00",
        ],
    );
    run_ok(
        &db_path,
        &[
            "schedule", "mark", "--sector", "Bar", "--day", "monday", "--employee", &ana,
            "19:30", "--unmark",
        ],
    );

    bishop()
        .args([
            "--db", &db_path, "schedule", "show", "--sector", "Bar", "--day", "SEGUNDA-FEIRA",
        ])
        .assert()
        .success()
        .stdout(contains("Total: 1.5h").and(contains("Version:")));
}

#[test]
fn test_invalid_day_and_slot_rejected() {
    let db_path = setup_test_db("schedule_invalid");
    init_with_company(&db_path);
    let ana = add_employee(&db_path, "Ana", "Bar", "Garçom", "2025-03-01");

    bishop()
        .args([
            "--db", &db_path, "schedule", "mark", "--sector", "Bar", "--day", "someday",
            "--employee", &ana, "18:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid day of week"));

    bishop()
        .args([
            "--db", &db_path, "schedule", "mark", "--sector", "Bar", "--day", "monday",
            "--employee", &ana, "18:15",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid time slot"));
}

#[test]
fn test_list_and_export_schedules() {
    let db_path = setup_test_db("schedule_list_export");
    init_with_company(&db_path);
    let ana = add_employee(&db_path, "Ana", "Bar", "Garçom", "2025-03-01");

    for day in ["monday", "sabado"] {
        run_ok(
            &db_path,
            &[
                "schedule", "mark", "--sector", "Bar", "--day", day, "--employee", &ana, "20:00",
            ],
        );
    }

    bishop()
        .args(["--db", &db_path, "schedule", "list"])
        .assert()
        .success()
        .stdout(contains("SEGUNDA-FEIRA").and(contains("SÁBADO")));

    let out = temp_out("schedule_list_export", "json");
    run_ok(&db_path, &["schedule", "export", "--file", &out]);

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["version"], "1.0");
    assert_eq!(json["schedules"].as_object().unwrap().len(), 2);
    assert!(json["registry"]["Bar"]["SÁBADO"].is_object());
}
