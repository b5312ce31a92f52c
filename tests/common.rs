#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, FixedOffset};
use punchclock::models::action::Action;
use punchclock::models::event::Event;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary runner with an isolated (empty) configuration directory.
pub fn pc(name: &str) -> Command {
    let mut dir: PathBuf = env::temp_dir();
    dir.push(format!("{}_punchclock_cfg", name));
    fs::create_dir_all(&dir).ok();

    let mut cmd = cargo_bin_cmd!("punchclock");
    cmd.env("PUNCHCLOCK_CONFIG_DIR", &dir);
    cmd.env_remove("PUNCHCLOCK_LOG");
    cmd
}

/// Create a unique store path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_punchclock.{}", name, ext));
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

/// Initialize a SQLite store in test mode
pub fn init_db(name: &str, db_path: &str) {
    pc(name)
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn ts(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).expect("valid RFC3339 in test")
}

pub fn ev(person: &str, action: Action, at: &str) -> Event {
    Event::new(person, "Intern", action, ts(at))
}

pub fn clock_in(person: &str, at: &str) -> Event {
    ev(person, Action::ClockIn, at)
}

pub fn clock_out(person: &str, at: &str) -> Event {
    ev(person, Action::ClockOut, at)
}
