//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;
use pocketwise_core::{load_records, Category, Config, ConfigSource, Store};

use crate::cli::{Cli, RecordsArgs};
use crate::commands::{self, truncate};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 6, 15)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn write_records(dir: &Path) -> RecordsArgs {
    let path = dir.join("expenses.csv");
    std::fs::write(
        &path,
        "date,category,amount,notes\n\
         2026-05-10,food,400,\n\
         2026-06-01,food,1500,Catering\n\
         2026-06-03,transportation,300,Fuel\n\
         2026-06-05,housing,1200,Rent\n",
    )
    .unwrap();
    RecordsArgs {
        records: path,
        format: None,
    }
}

fn setup_store(dir: &Path) -> Store {
    let config = Config::embedded().unwrap();
    commands::open_store(&config, &write_records(dir), now()).unwrap()
}

// ========== Shared Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a longer title", 8), "a lon...");
    assert_eq!(truncate("₹₹₹₹₹₹", 5), "₹₹...");
}

#[test]
fn test_resolve_now_as_of() {
    let resolved = commands::resolve_now(Some("2026-02-28")).unwrap();
    assert_eq!(
        resolved,
        NaiveDate::from_ymd_opt(2026, 2, 28)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    );
    assert!(commands::resolve_now(Some("28/02/2026")).is_err());
    assert!(commands::resolve_now(None).is_ok());
}

#[test]
fn test_open_store_loads_records() {
    let dir = tempfile::tempdir().unwrap();
    let store = setup_store(dir.path());

    assert_eq!(store.expenses().len(), 4);
    assert_eq!(store.current_month_expenses(now()).len(), 3);
    assert_eq!(store.category_total(Category::Food, now()), 1500.0);
    assert!(!store.insights().is_empty());
}

#[test]
fn test_open_store_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::embedded().unwrap();
    let args = RecordsArgs {
        records: dir.path().join("missing.csv"),
        format: None,
    };
    assert!(commands::open_store(&config, &args, now()).is_err());
}

#[test]
fn test_open_store_rejects_bad_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(&path, "date,category,amount\n2026-06-01,shopping,10\n").unwrap();
    let config = Config::embedded().unwrap();
    let args = RecordsArgs {
        records: path,
        format: None,
    };
    assert!(commands::open_store(&config, &args, now()).is_err());
}

// ========== Report Command Tests ==========

#[test]
fn test_cmd_reports_text_and_json() {
    let dir = tempfile::tempdir().unwrap();
    let store = setup_store(dir.path());

    for json in [false, true] {
        assert!(commands::cmd_summary(&store, "₹", now(), json).is_ok());
        assert!(commands::cmd_insights(&store, json).is_ok());
        assert!(commands::cmd_forecast(&store, "₹", json).is_ok());
        assert!(commands::cmd_budget(&store, "₹", now(), json).is_ok());
        assert!(commands::cmd_carbon(&store, now(), json).is_ok());
    }
}

#[test]
fn test_cmd_suggest_income_override() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = setup_store(dir.path());

    assert!(commands::cmd_suggest(&mut store, Some(1000.0), "₹", now(), false).is_ok());
    assert_eq!(store.user().monthly_income, 1000.0);
    assert!(!store.budget_suggestions(now()).is_empty());

    assert!(commands::cmd_suggest(&mut store, None, "₹", now(), true).is_ok());
    assert_eq!(store.user().monthly_income, 1000.0);
}

#[test]
fn test_cmd_reports_on_empty_store() {
    let config = Config::embedded().unwrap();
    let store = Store::from_config(&config);

    assert!(commands::cmd_insights(&store, false).is_ok());
    assert!(commands::cmd_carbon(&store, now(), false).is_ok());
    assert!(commands::cmd_summary(&store, "₹", now(), false).is_ok());
}

// ========== Config & Init Command Tests ==========

#[test]
fn test_cmd_init_writes_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pocketwise").join("config.toml");

    assert!(commands::cmd_init(Some(&path), false).is_ok());
    assert!(path.exists());
    assert!(commands::cmd_init(Some(&path), false).is_err());
    assert!(commands::cmd_init(Some(&path), true).is_ok());

    let (config, source) = commands::load_config(Some(&path)).unwrap();
    assert_eq!(source, ConfigSource::File(path.clone()));
    assert!(commands::cmd_config(&config, &source, false).is_ok());
    assert!(commands::cmd_config(&config, &source, true).is_ok());
}

// ========== Challenges Command Tests ==========

#[test]
fn test_cmd_challenges_complete_persists_points() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    commands::cmd_init(Some(&path), false).unwrap();

    let (config, source) = commands::load_config(Some(&path)).unwrap();
    let before = config.profile.points;
    let pending = config
        .challenges
        .iter()
        .find(|c| !c.completed)
        .cloned()
        .unwrap();
    assert!(commands::cmd_challenges_list(&config, false).is_ok());

    commands::cmd_challenges_complete(config, &source, &pending.id).unwrap();

    let (reloaded, _) = commands::load_config(Some(&path)).unwrap();
    assert_eq!(reloaded.profile.points, before + pending.points);
    assert!(reloaded
        .challenges
        .iter()
        .any(|c| c.id == pending.id && c.completed));

    // Completing again is a no-op
    commands::cmd_challenges_complete(reloaded, &source, &pending.id).unwrap();
    let (again, _) = commands::load_config(Some(&path)).unwrap();
    assert_eq!(again.profile.points, before + pending.points);
}

#[test]
fn test_cmd_challenges_complete_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    commands::cmd_init(Some(&path), false).unwrap();
    let (config, source) = commands::load_config(Some(&path)).unwrap();

    assert!(commands::cmd_challenges_complete(config.clone(), &source, "missing").is_err());
    assert!(commands::cmd_challenges_complete(config, &ConfigSource::Embedded, "challenge-2")
        .is_err());
}

// ========== Budget Limit Command Tests ==========

#[test]
fn test_cmd_set_limit_persists_budget() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    commands::cmd_init(Some(&path), false).unwrap();

    let (config, source) = commands::load_config(Some(&path)).unwrap();
    let total_before = config.budget.total_limit();
    let food_before = config.budget.limit_for(Category::Food).unwrap();

    commands::cmd_set_limit(config, &source, "food", food_before + 250.0).unwrap();

    let (reloaded, _) = commands::load_config(Some(&path)).unwrap();
    assert_eq!(
        reloaded.budget.limit_for(Category::Food),
        Some(food_before + 250.0)
    );
    assert_eq!(reloaded.budget.total_limit(), total_before + 250.0);
    assert_eq!(reloaded.budget.limits().len(), 10);
}

#[test]
fn test_cmd_set_limit_errors_leave_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    commands::cmd_init(Some(&path), false).unwrap();
    let original = std::fs::read_to_string(&path).unwrap();
    let (config, source) = commands::load_config(Some(&path)).unwrap();

    assert!(commands::cmd_set_limit(config.clone(), &source, "food", 0.0).is_err());
    assert!(commands::cmd_set_limit(config.clone(), &source, "shopping", 50.0).is_err());
    assert!(commands::cmd_set_limit(config, &ConfigSource::Embedded, "food", 50.0).is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
}

// ========== Dispatch Tests ==========

#[test]
fn test_bad_as_of_only_fails_date_commands() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let config = config_path.to_str().unwrap();
    let records = write_records(dir.path());
    let records = records.records.to_str().unwrap();

    let run = |args: &[&str]| {
        let mut argv = vec!["pocketwise", "--as-of", "not-a-date"];
        argv.extend_from_slice(args);
        crate::run(Cli::parse_from(argv))
    };

    assert!(run(&["init", "--path", config]).is_ok());
    assert!(run(&["--config", config, "config"]).is_ok());
    assert!(run(&["--config", config, "challenges"]).is_ok());
    assert!(run(&["--config", config, "set-limit", "food", "700"]).is_ok());

    assert!(run(&["--config", config, "summary", "--records", records]).is_err());
    assert!(run(&["demo", "-n", "1"]).is_err());
}

#[test]
fn test_run_report_with_as_of() {
    let dir = tempfile::tempdir().unwrap();
    let records = write_records(dir.path());
    let cli = Cli::parse_from([
        "pocketwise",
        "--as-of",
        "2026-06-15",
        "--json",
        "forecast",
        "--records",
        records.records.to_str().unwrap(),
    ]);
    assert!(crate::run(cli).is_ok());
}

// ========== Demo Command Tests ==========

#[test]
fn test_cmd_demo_output_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("demo.json");

    commands::cmd_demo(25, Some(3), Some(&path), now()).unwrap();

    let expenses = load_records(&path, None).unwrap();
    assert_eq!(expenses.len(), 25);
    assert!(expenses.iter().all(|e| e.occurred_at <= now()));
}
