// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{AppConfig, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file and return the raw, unvalidated model.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config: RawConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Parse TOML text and validate it.
pub fn parse_and_validate(contents: &str) -> Result<AppConfig> {
    let raw: RawConfigFile = toml::from_str(contents)?;
    AppConfig::try_from(raw)
}

/// Load a configuration file from path and validate it.
///
/// This is the entry point used by the `config` startup task.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<AppConfig> {
    let raw_config = load_from_path(&path)?;
    AppConfig::try_from(raw_config)
}

/// Config path used when `--config` is not given.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("initq.toml")
}
