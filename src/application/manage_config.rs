//! Config management use case

use crate::domain::CalendarZone;
use crate::error::{Result, TraceError};
use crate::infrastructure::{Config, DocumentRoot, SeedPolicy};

/// Service for reading and changing journal configuration
pub struct ConfigService {
    root: DocumentRoot,
}

impl ConfigService {
    pub fn new(root: DocumentRoot) -> Self {
        ConfigService { root }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = Config::load_or_default(self.root.path())?;

        match key {
            "timezone" => Ok(config.timezone.to_string()),
            "seed" => Ok(config.seed.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(TraceError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: timezone, seed, created",
                key
            ))),
        }
    }

    /// Set a config value, writing the config file if it did not exist
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = Config::load_or_default(self.root.path())?;

        match key {
            "timezone" => {
                config.timezone = value.parse::<CalendarZone>().map_err(TraceError::Config)?;
            }
            "seed" => {
                config.seed = value.parse::<SeedPolicy>().map_err(TraceError::Config)?;
            }
            "created" => {
                return Err(TraceError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(TraceError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: timezone, seed",
                    key
                )));
            }
        }

        config.save_to_dir(self.root.path())
    }

    /// Current config, defaults included
    pub fn list(&self) -> Result<Config> {
        Config::load_or_default(self.root.path())
    }
}
