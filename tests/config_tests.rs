use std::env;
use std::fs;
use std::path::PathBuf;

use punchclock::config::Config;
use punchclock::errors::AppError;
use punchclock::store::StoreKind;

fn temp_config(name: &str, content: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("{}_punchclock.conf", name));
    fs::write(&path, content).expect("write config");
    path
}

#[test]
fn test_missing_file_gives_defaults() {
    let mut path = env::temp_dir();
    path.push("does_not_exist_punchclock.conf");
    fs::remove_file(&path).ok();

    let cfg = Config::load_from(&path).expect("defaults");
    assert_eq!(cfg.store, StoreKind::Sqlite);
    assert_eq!(cfg.timezone, "UTC");
    assert_eq!(cfg.default_role, "Intern");
    assert!(cfg.database.ends_with("punchclock.sqlite"));
}

#[test]
fn test_partial_file_fills_defaults_and_reports_missing_keys() {
    let path = temp_config(
        "cfg_partial",
        "database: /tmp/shop_log.csv\nstore: csv\ntimezone: Asia/Kolkata\n",
    );

    let cfg = Config::load_from(&path).expect("load");
    assert_eq!(cfg.store, StoreKind::Csv);
    assert_eq!(cfg.database, "/tmp/shop_log.csv");
    assert_eq!(cfg.roles, vec!["Intern".to_string(), "Store Worker".to_string()]);
    assert_eq!(cfg.role_or_default(None), "Intern");
    assert_eq!(cfg.role_or_default(Some("Manager")), "Manager");

    let missing = Config::missing_fields(&path).expect("check");
    assert_eq!(
        missing,
        vec!["people", "roles", "default_role", "separator_char"]
    );
}

#[test]
fn test_bad_timezone_is_rejected_on_load() {
    let path = temp_config("cfg_bad_tz", "timezone: Nowhere/Special\n");
    let err = Config::load_from(&path).expect_err("must fail");
    assert!(matches!(err, AppError::InvalidTimezone(_)));
}

#[test]
fn test_save_and_reload() {
    let mut path = env::temp_dir();
    path.push("cfg_roundtrip_punchclock.conf");

    let cfg = Config {
        timezone: "Europe/Rome".to_string(),
        people: vec!["Suchi".to_string()],
        ..Config::default()
    };
    cfg.save_to(&path).expect("save");

    let back = Config::load_from(&path).expect("load");
    assert_eq!(back.timezone, "Europe/Rome");
    assert_eq!(back.people, vec!["Suchi".to_string()]);
    assert!(Config::missing_fields(&path).expect("check").is_empty());
}

#[test]
fn test_relative_db_path_resolves_from_working_directory() {
    let resolved = Config::resolve_db_path("shop.sqlite");
    assert!(resolved.is_absolute());
    assert_eq!(
        resolved,
        env::current_dir().expect("cwd").join("shop.sqlite")
    );

    let abs = env::temp_dir().join("abs_shop.sqlite");
    assert_eq!(Config::resolve_db_path(&abs.to_string_lossy()), abs);
}
