//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `load_config` / `open_store` / `resolve_now` - Shared setup for every report
//! - `save_config` - Write a changed config back to the file it came from
//! - `cmd_init` - Write the default config file
//! - `cmd_config` - Show the resolved config

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use pocketwise_core::config::{default_config_path, write_default_config};
use pocketwise_core::{load_records, Config, ConfigSource, Store};
use tracing::info;

use crate::cli::RecordsArgs;

use super::print_json;

/// Load config from an explicit path, the user data dir, or built-in defaults
pub fn load_config(explicit: Option<&Path>) -> Result<(Config, ConfigSource)> {
    Config::load(explicit).context("Failed to load config")
}

/// Build a store from config and load the records file into it
pub fn open_store(config: &Config, records: &RecordsArgs, now: NaiveDateTime) -> Result<Store> {
    let expenses = load_records(&records.records, records.format).with_context(|| {
        format!(
            "Failed to load expense records from {}",
            records.records.display()
        )
    })?;

    let mut store = Store::from_config(config);
    let count = store
        .add_expenses(expenses, now)
        .context("Failed to add expense records")?;
    info!(count, "Loaded expenses");

    Ok(store)
}

/// Write `config` back to the file it was loaded from.
///
/// Built-in defaults have no file, so changes to them are refused.
pub fn save_config(config: &Config, source: &ConfigSource) -> Result<()> {
    let ConfigSource::File(path) = source else {
        anyhow::bail!(
            "Config comes from built-in defaults. Run 'pocketwise init' to create a config file first."
        );
    };

    let content = config.to_toml().context("Failed to serialize config")?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    info!(path = %path.display(), "Saved config");

    Ok(())
}

/// Resolve `--as-of` to local midnight of that date, or the local wall clock
pub fn resolve_now(as_of: Option<&str>) -> Result<NaiveDateTime> {
    match as_of {
        Some(date) => {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .context("Invalid --as-of date format (use YYYY-MM-DD)")?;
            Ok(date.and_time(NaiveTime::MIN))
        }
        None => Ok(chrono::Local::now().naive_local()),
    }
}

pub fn cmd_init(path: Option<&Path>, force: bool) -> Result<()> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path().context("Could not determine the user data directory")?,
    };

    println!("🔧 Writing default config to {}...", path.display());
    write_default_config(&path, force).context("Failed to write config")?;

    println!("✅ Config written successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Edit your profile, budget and challenges in {}", path.display());
    println!("  2. Try it out: pocketwise demo -o demo.json && pocketwise summary -r demo.json");

    Ok(())
}

pub fn cmd_config(config: &Config, source: &ConfigSource, json: bool) -> Result<()> {
    if json {
        return print_json(config);
    }

    println!("# Source: {}", source);
    print!("{}", config.to_toml().context("Failed to serialize config")?);

    Ok(())
}
