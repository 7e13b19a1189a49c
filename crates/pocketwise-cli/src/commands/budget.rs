//! Budget limit command implementations

use anyhow::{Context, Result};
use pocketwise_core::{Category, Config, ConfigSource, Store};

use super::save_config;

/// Set one category's monthly limit and write the budget back to the config file
pub fn cmd_set_limit(
    config: Config,
    source: &ConfigSource,
    category: &str,
    limit: f64,
) -> Result<()> {
    let category: Category = category.parse().context("Invalid category")?;

    let mut store = Store::from_config(&config);
    let previous = store.budget().limit_for(category);
    store
        .set_budget_limit(category, limit)
        .with_context(|| format!("Failed to set the {} limit", category))?;

    let updated = Config {
        budget: store.budget().clone(),
        ..config
    };
    save_config(&updated, source)?;

    match previous {
        Some(old) => println!(
            "✅ {} limit changed from {:.2} to {:.2}",
            category.label(),
            old,
            limit
        ),
        None => println!("✅ {} limit set to {:.2}", category.label(), limit),
    }
    println!("   Total monthly budget: {:.2}", store.budget().total_limit());

    Ok(())
}
