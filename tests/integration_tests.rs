use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_data, setup_test_db, thy};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init_creates_database");

    thy()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_add_and_recent() {
    let db_path = setup_test_db("add_and_recent");
    init_db_with_data(&db_path);

    thy()
        .args(["--db", &db_path, "recent"])
        .assert()
        .success()
        .stdout(contains("Focus"))
        .stdout(contains("Reading"))
        .stdout(contains("00:25:00.00"))
        .stdout(contains("01:30:00.00"))
        .stdout(contains("chapter 4"));
}

#[test]
fn test_recent_limit_shows_latest_saved_first() {
    let db_path = setup_test_db("recent_limit");
    init_db_with_data(&db_path);

    thy()
        .args(["--db", &db_path, "recent", "--limit", "1"])
        .assert()
        .success()
        .stdout(contains("Reading"))
        .stdout(contains("Focus").not());
}

#[test]
fn test_add_rejects_invalid_duration() {
    let db_path = setup_test_db("add_invalid_duration");

    thy()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    thy()
        .args(["--db", &db_path, "add", "Focus", "ten minutes"])
        .assert()
        .failure()
        .stderr(contains("Invalid duration"));

    thy()
        .args(["--db", &db_path, "add", "Focus", "10m", "--laps", "8m,5m"])
        .assert()
        .failure();
}

#[test]
fn test_stats_today_and_streak() {
    let db_path = setup_test_db("stats_today_and_streak");

    thy()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    thy()
        .args(["--db", &db_path, "add", "Focus", "45m"])
        .assert()
        .success();

    thy()
        .args(["--db", &db_path, "stats"])
        .assert()
        .success()
        .stdout(contains("Today"))
        .stdout(contains("00:45:00.00"))
        .stdout(contains("Current: "))
        .stdout(contains("1 day"))
        .stdout(contains("Focus"));
}

#[test]
fn test_stats_unknown_timer() {
    let db_path = setup_test_db("stats_unknown_timer");
    init_db_with_data(&db_path);

    thy()
        .args(["--db", &db_path, "stats", "--timer", "Nope"])
        .assert()
        .success()
        .stdout(contains("No sessions for 'Nope'"));
}

#[test]
fn test_run_saves_on_quit() {
    let db_path = setup_test_db("run_saves_on_quit");

    thy()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    thy()
        .args(["--db", &db_path, "run", "--name", "Deep work"])
        .write_stdin("start\nlap\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(contains("Deep work"))
        .stdout(contains("Saved 1 session(s)"));

    thy()
        .args(["--db", &db_path, "recent"])
        .assert()
        .success()
        .stdout(contains("Deep work"));
}

#[test]
fn test_run_reset_of_idle_timer_saves_nothing() {
    let db_path = setup_test_db("run_idle_reset");

    thy()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    thy()
        .args(["--db", &db_path, "run"])
        .write_stdin("reset\nlap\ndel\nquit\n")
        .assert()
        .success()
        .stdout(contains("had no time to save"))
        .stdout(contains("Nothing to lap yet"))
        .stdout(contains("Cannot remove the last timer"));

    thy()
        .args(["--db", &db_path, "recent"])
        .assert()
        .success()
        .stdout(contains("No sessions recorded yet"));
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("db_info_and_check");
    init_db_with_data(&db_path);

    thy()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Total sessions:"))
        .stdout(contains("2025-09-01"))
        .stdout(contains("2025-09-15"))
        .stdout(contains("Integrity check passed"));
}

#[test]
fn test_log_print_lists_operations() {
    let db_path = setup_test_db("log_print");
    init_db_with_data(&db_path);

    thy()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("Internal log"))
        .stdout(contains("init"))
        .stdout(contains("save"));
}
