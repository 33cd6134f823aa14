//! Configuration management

use crate::domain::CalendarZone;
use crate::error::{Result, TraceError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Directory under the document root holding trace's own settings
pub const CONFIG_DIR: &str = ".trace";

/// When the two sample entries are written into the journal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedPolicy {
    /// Only when no entries file exists yet
    #[default]
    FirstRun,
    /// Whenever the loaded journal has no entries, even after deleting all of them
    WhenEmpty,
    Never,
}

impl FromStr for SeedPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first-run" => Ok(SeedPolicy::FirstRun),
            "when-empty" => Ok(SeedPolicy::WhenEmpty),
            "never" => Ok(SeedPolicy::Never),
            _ => Err(format!("Invalid seed policy: '{}'", s)),
        }
    }
}

impl fmt::Display for SeedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SeedPolicy::FirstRun => "first-run",
            SeedPolicy::WhenEmpty => "when-empty",
            SeedPolicy::Never => "never",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timezone: CalendarZone,
    #[serde(default)]
    pub seed: SeedPolicy,
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
}

impl Default for Config {
    fn default() -> Self {
        Config::new(CalendarZone::default(), SeedPolicy::default())
    }
}

impl Config {
    pub fn new(timezone: CalendarZone, seed: SeedPolicy) -> Self {
        Config {
            timezone,
            seed,
            created: Utc::now(),
        }
    }

    /// Path of the config file for a document root
    pub fn path_in(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR).join("config.toml")
    }

    /// Whether a config file exists under the given root
    pub fn exists_in(root: &Path) -> bool {
        Self::path_in(root).is_file()
    }

    /// Load config from .trace/config.toml, or None when there is none
    pub fn load_from_dir(root: &Path) -> Result<Option<Self>> {
        let config_path = Self::path_in(root);

        let contents = match fs::read_to_string(&config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(TraceError::Io(e)),
        };

        toml::from_str(&contents)
            .map(Some)
            .map_err(|e| TraceError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Load config, falling back to defaults when the journal was never initialized
    pub fn load_or_default(root: &Path) -> Result<Self> {
        Ok(Self::load_from_dir(root)?.unwrap_or_default())
    }

    /// Save config to .trace/config.toml under the given root
    pub fn save_to_dir(&self, root: &Path) -> Result<()> {
        let config_dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir)?;

        let contents = toml::to_string_pretty(self)?;
        fs::write(Self::path_in(root), contents)?;

        Ok(())
    }
}
