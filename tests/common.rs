#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn thy() -> Command {
    cargo_bin_cmd!("thymer")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_thymer.sqlite", name));
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

/// Initialize DB and add a small dataset useful for many tests
pub fn init_db_with_data(db_path: &str) {
    thy()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    thy()
        .args([
            "--db",
            db_path,
            "add",
            "Focus",
            "25m",
            "--date",
            "2025-09-01",
            "--at",
            "09:00",
            "--laps",
            "10m,15m",
        ])
        .assert()
        .success();

    thy()
        .args([
            "--db",
            db_path,
            "add",
            "Reading",
            "1h30m",
            "--date",
            "2025-09-15",
            "--at",
            "20:00",
            "--notes",
            "chapter 4",
        ])
        .assert()
        .success();
}
