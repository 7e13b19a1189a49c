//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pocketwise_core::RecordFormat;

/// Pocketwise - Understand and trim your monthly spending
#[derive(Parser)]
#[command(name = "pocketwise")]
#[command(about = "Budgeting insights, forecasts and savings advice", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the user data dir, then built-in defaults)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print reports as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Analyse as of this date (YYYY-MM-DD) instead of today
    ///
    /// Month boundaries and forecasts are computed from this date.
    #[arg(long, global = true)]
    pub as_of: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to read expense records from
#[derive(Args, Debug, Clone)]
pub struct RecordsArgs {
    /// Expense records file (.json or .csv)
    #[arg(short, long)]
    pub records: PathBuf,

    /// Records format (detected from the extension if not specified)
    #[arg(long)]
    pub format: Option<RecordFormat>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default config file
    Init {
        /// Where to write it (defaults to the user data dir)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Show the resolved config
    Config,

    /// Show dashboard summary
    #[command(alias = "dashboard")]
    Summary {
        #[command(flatten)]
        records: RecordsArgs,
    },

    /// Generate spending insights (warnings, achievements, tips)
    Insights {
        #[command(flatten)]
        records: RecordsArgs,
    },

    /// Forecast end-of-month spending per category
    Forecast {
        #[command(flatten)]
        records: RecordsArgs,
    },

    /// Suggest budget cuts when the forecast exceeds income
    Suggest {
        #[command(flatten)]
        records: RecordsArgs,

        /// Monthly income to plan against (defaults to the profile's)
        #[arg(short, long)]
        income: Option<f64>,
    },

    /// Show budget progress and forecast overruns
    Budget {
        #[command(flatten)]
        records: RecordsArgs,
    },

    /// Set a category's monthly budget limit
    ///
    /// Updates the config file the budget was loaded from.
    SetLimit {
        /// Category (food, transportation, housing, ...)
        category: String,

        /// New monthly limit (must be positive)
        limit: f64,
    },

    /// Show this month's carbon footprint
    Carbon {
        #[command(flatten)]
        records: RecordsArgs,
    },

    /// List or complete saving challenges
    Challenges {
        #[command(subcommand)]
        action: Option<ChallengesAction>,
    },

    /// Generate random demo expense records
    Demo {
        /// Number of expenses
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output file (JSON, defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ChallengesAction {
    /// List challenges (default)
    List,

    /// Mark a challenge completed and award its points
    ///
    /// Updates the config file the challenges were loaded from.
    Complete {
        /// Challenge ID
        id: String,
    },
}
