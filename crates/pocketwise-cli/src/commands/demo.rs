//! Demo records generation

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use pocketwise_core::demo::generate_expenses;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn cmd_demo(
    count: usize,
    seed: Option<u64>,
    out: Option<&Path>,
    now: NaiveDateTime,
) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let expenses = generate_expenses(count, now, &mut rng);
    let json = serde_json::to_string_pretty(&expenses).context("Failed to serialize expenses")?;

    match out {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("✅ Wrote {} demo expenses to {}", expenses.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
