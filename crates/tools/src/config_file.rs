//! TOML floor configuration files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dungeon_core::FloorConfig;

/// Reads and validates a config file. Missing keys take their defaults.
pub fn load(path: &Path) -> Result<FloorConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: FloorConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.validate().with_context(|| format!("Invalid config in {}", path.display()))?;
    Ok(config)
}

/// The config at `path`, or the defaults when no path is given.
pub fn load_or_default(path: Option<&Path>) -> Result<FloorConfig> {
    match path {
        Some(path) => load(path),
        None => Ok(FloorConfig::default()),
    }
}

/// Writes `config` through a temporary sibling so readers never see a torn file.
pub fn write_atomic(config: &FloorConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    let text = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(&tmp_path, text)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to move config into {}", path.display()))?;
    Ok(())
}
