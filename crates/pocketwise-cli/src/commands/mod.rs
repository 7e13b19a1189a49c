//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Config, init and shared utilities (load_config, open_store, resolve_now)
//! - `reports` - Analysis reports (summary, insights, forecast, suggest, budget, carbon)
//! - `budget` - Budget limit changes
//! - `challenges` - Challenge listing and completion
//! - `demo` - Demo records generation

pub mod budget;
pub mod challenges;
pub mod core;
pub mod demo;
pub mod reports;

// Re-export command functions for main.rs
pub use budget::*;
pub use challenges::*;
pub use core::*;
pub use demo::*;
pub use reports::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
