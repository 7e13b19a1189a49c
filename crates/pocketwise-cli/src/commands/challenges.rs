//! Challenge command implementations

use anyhow::{Context, Result};
use pocketwise_core::models::ChallengeKind;
use pocketwise_core::{Config, ConfigSource, Store};

use super::{print_json, save_config, truncate};

fn kind_icon(kind: ChallengeKind) -> &'static str {
    match kind {
        ChallengeKind::Budget => "💰",
        ChallengeKind::Eco => "🌱",
        ChallengeKind::Daily => "📅",
    }
}

pub fn cmd_challenges_list(config: &Config, json: bool) -> Result<()> {
    if json {
        return print_json(&config.challenges);
    }

    println!();
    println!("🎯 Challenges ({} points earned)", config.profile.points);
    println!("   ─────────────────────────────────────────────────────────────");

    if config.challenges.is_empty() {
        println!("   No challenges configured.");
        return Ok(());
    }

    for challenge in &config.challenges {
        let status = if challenge.completed { "✅" } else { "⬜" };
        println!(
            "   {} {} {:30} {:>4} pts  [{}]",
            status,
            kind_icon(challenge.kind),
            truncate(&challenge.title, 30),
            challenge.points,
            challenge.id
        );
        println!("        {}", challenge.description);
    }

    Ok(())
}

/// Complete a challenge and write the awarded points back to the config file
pub fn cmd_challenges_complete(config: Config, source: &ConfigSource, id: &str) -> Result<()> {
    if *source == ConfigSource::Embedded {
        anyhow::bail!(
            "Challenges come from built-in defaults. Run 'pocketwise init' to create a config file first."
        );
    }

    let mut store = Store::from_config(&config);
    let awarded = store
        .complete_challenge(id)
        .with_context(|| format!("Failed to complete challenge '{}'", id))?;

    if awarded == 0 {
        println!("ℹ️  Challenge '{}' was already completed.", id);
        return Ok(());
    }

    let updated = Config {
        profile: store.user().clone(),
        challenges: store.challenges().to_vec(),
        ..config
    };
    save_config(&updated, source)?;

    println!(
        "🎉 Challenge completed! +{} points ({} total)",
        awarded,
        store.user().points
    );

    Ok(())
}
