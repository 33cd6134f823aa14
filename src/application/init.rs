//! Initialize journal use case

use crate::domain::CalendarZone;
use crate::error::{Result, TraceError};
use crate::infrastructure::{Config, DocumentRoot, SeedPolicy};
use std::path::Path;

/// Create a journal at `path` with a fresh `.trace/config.toml`
pub fn init(path: &Path, timezone: CalendarZone, seed: SeedPolicy) -> Result<Config> {
    let root = DocumentRoot::new(path);
    root.ensure_exists()?;

    if Config::exists_in(root.path()) {
        return Err(TraceError::Config(format!(
            "Directory already initialized: {}",
            path.display()
        )));
    }

    let config = Config::new(timezone, seed);
    config.save_to_dir(root.path())?;
    tracing::info!(path = %path.display(), "initialized journal");

    Ok(config)
}
