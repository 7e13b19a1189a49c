//! Pocketwise CLI - Personal budgeting insights
//!
//! Usage:
//!   pocketwise init                        Write the default config
//!   pocketwise summary -r expenses.csv     Dashboard summary
//!   pocketwise insights -r expenses.csv    Month-over-month insights
//!   pocketwise suggest -r expenses.csv     Budget cuts against income
//!   pocketwise set-limit food 500          Change a budget limit
//!   pocketwise demo -n 50 -o demo.json     Generate demo records

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    run(cli)
}

/// Dispatch a parsed command line
fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    let as_of = cli.as_of.as_deref();

    match cli.command {
        Commands::Init { path, force } => commands::cmd_init(path.as_deref(), force),
        Commands::Config => {
            let (config, source) = commands::load_config(config_path)?;
            commands::cmd_config(&config, &source, cli.json)
        }
        Commands::Summary { records } => {
            let now = commands::resolve_now(as_of)?;
            let (config, _) = commands::load_config(config_path)?;
            let store = commands::open_store(&config, &records, now)?;
            commands::cmd_summary(&store, &config.display.currency_symbol, now, cli.json)
        }
        Commands::Insights { records } => {
            let now = commands::resolve_now(as_of)?;
            let (config, _) = commands::load_config(config_path)?;
            let store = commands::open_store(&config, &records, now)?;
            commands::cmd_insights(&store, cli.json)
        }
        Commands::Forecast { records } => {
            let now = commands::resolve_now(as_of)?;
            let (config, _) = commands::load_config(config_path)?;
            let store = commands::open_store(&config, &records, now)?;
            commands::cmd_forecast(&store, &config.display.currency_symbol, cli.json)
        }
        Commands::Suggest { records, income } => {
            let now = commands::resolve_now(as_of)?;
            let (config, _) = commands::load_config(config_path)?;
            let mut store = commands::open_store(&config, &records, now)?;
            commands::cmd_suggest(
                &mut store,
                income,
                &config.display.currency_symbol,
                now,
                cli.json,
            )
        }
        Commands::Budget { records } => {
            let now = commands::resolve_now(as_of)?;
            let (config, _) = commands::load_config(config_path)?;
            let store = commands::open_store(&config, &records, now)?;
            commands::cmd_budget(&store, &config.display.currency_symbol, now, cli.json)
        }
        Commands::SetLimit { category, limit } => {
            let (config, source) = commands::load_config(config_path)?;
            commands::cmd_set_limit(config, &source, &category, limit)
        }
        Commands::Carbon { records } => {
            let now = commands::resolve_now(as_of)?;
            let (config, _) = commands::load_config(config_path)?;
            let store = commands::open_store(&config, &records, now)?;
            commands::cmd_carbon(&store, now, cli.json)
        }
        Commands::Challenges { action } => match action {
            None | Some(ChallengesAction::List) => {
                let (config, _) = commands::load_config(config_path)?;
                commands::cmd_challenges_list(&config, cli.json)
            }
            Some(ChallengesAction::Complete { id }) => {
                let (config, source) = commands::load_config(config_path)?;
                commands::cmd_challenges_complete(config, &source, &id)
            }
        },
        Commands::Demo { count, seed, out } => {
            let now = commands::resolve_now(as_of)?;
            commands::cmd_demo(count, seed, out.as_deref(), now)
        }
    }
}
