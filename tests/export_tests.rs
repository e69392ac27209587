mod common;
use common::{init_db_with_data, setup_test_db, temp_out, thy};
use predicates::str::contains;
use std::fs;

#[test]
fn test_export_json_document() {
    let db_path = setup_test_db("export_json_document");
    init_db_with_data(&db_path);

    let out = temp_out("export_json_document", "json");

    thy()
        .args(["--db", &db_path, "export", "--file", &out])
        .assert()
        .success()
        .stdout(contains("JSON export completed"));

    let content = fs::read_to_string(&out).expect("read exported json");
    let doc: serde_json::Value = serde_json::from_str(&content).expect("valid json");

    let sessions = doc["sessions"].as_array().expect("sessions array");
    assert_eq!(sessions.len(), 2);
    // most recently saved first
    assert_eq!(sessions[0]["timer_name"], "Reading");
    assert_eq!(sessions[1]["laps"], serde_json::json!([600.0, 900.0]));
    assert!(doc["daily_stats"].is_array());
    assert!(doc["export_date"].is_string());
}

#[test]
fn test_export_csv_rows() {
    let db_path = setup_test_db("export_csv_rows");
    init_db_with_data(&db_path);

    let out = temp_out("export_csv_rows", "csv");

    thy()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("timer_name,"));
    assert!(content.contains("2025-09-01"));
    assert!(content.contains("600.00;900.00"));
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn test_export_existing_file_requires_confirmation() {
    let db_path = setup_test_db("export_existing_file");
    init_db_with_data(&db_path);

    let out = temp_out("export_existing_file", "json");
    fs::write(&out, "keep me").unwrap();

    thy()
        .args(["--db", &db_path, "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("Export cancelled"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    thy()
        .args(["--db", &db_path, "export", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("\"sessions\""));
}

#[test]
fn test_import_round_trip() {
    let db_path = setup_test_db("import_round_trip_src");
    init_db_with_data(&db_path);

    let out = temp_out("import_round_trip", "json");
    thy()
        .args(["--db", &db_path, "export", "--file", &out])
        .assert()
        .success();

    let target = setup_test_db("import_round_trip_dst");
    thy()
        .args(["--db", &target, "--test", "init"])
        .assert()
        .success();

    thy()
        .args(["--db", &target, "import", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Imported 2 session(s)"));

    // save order is preserved: Reading was saved last
    thy()
        .args(["--db", &target, "recent", "--limit", "1"])
        .assert()
        .success()
        .stdout(contains("Reading"));
}

#[test]
fn test_import_rejects_garbage() {
    let db_path = setup_test_db("import_garbage");
    thy()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let bad = temp_out("import_garbage", "json");
    fs::write(&bad, "{ not json").unwrap();

    thy()
        .args(["--db", &db_path, "import", "--file", &bad])
        .assert()
        .failure()
        .stderr(contains("Error:"));
}
