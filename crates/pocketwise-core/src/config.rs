//! Configuration: user profile, monthly budget, challenges, display options
//!
//! ## Configuration Resolution
//!
//! 1. An explicit path (e.g. `--config`), which must exist
//! 2. The override in the data dir (~/.local/share/pocketwise/config.toml)
//! 3. Embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Budget, Challenge, UserProfile};

/// Embedded default config (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/pocketwise.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Prefix for amounts in messages and reports
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub profile: UserProfile,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default = "Budget::empty")]
    pub budget: Budget,
    #[serde(default)]
    pub challenges: Vec<Challenge>,
}

/// Where a loaded config came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Embedded,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Embedded => write!(f, "built-in defaults"),
        }
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("pocketwise").join("config.toml"))
}

impl Config {
    /// Parse config from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.profile.id.trim().is_empty() {
            return Err(Error::Config("profile.id must not be empty".into()));
        }
        let mut seen = std::collections::HashSet::new();
        for challenge in &config.challenges {
            if !seen.insert(challenge.id.as_str()) {
                return Err(Error::Config(format!(
                    "duplicate challenge id: {}",
                    challenge.id
                )));
            }
        }
        Ok(config)
    }

    pub fn embedded() -> Result<Self> {
        Self::parse(DEFAULT_CONFIG)
    }

    /// Load using the resolution order above
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::load_file(&path),
            _ => {
                tracing::debug!("No config override found, using built-in defaults");
                Ok((Self::embedded()?, ConfigSource::Embedded))
            }
        }
    }

    fn load_file(path: &Path) -> Result<(Self, ConfigSource)> {
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok((config, ConfigSource::File(path.to_path_buf())))
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Write the embedded defaults to `path`, creating parent directories.
/// Refuses to replace an existing file unless `force` is set.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::Config(format!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_CONFIG)?;
    Ok(())
}
