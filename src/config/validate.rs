// src/config/validate.rs

use std::net::SocketAddr;

use crate::config::model::{AppConfig, RawConfigFile};
use crate::errors::{InitQError, Result};

impl TryFrom<RawConfigFile> for AppConfig {
    type Error = InitQError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_database(&raw)?;
        let listen = parse_listen(&raw)?;
        Ok(AppConfig::new_unchecked(
            raw.database.url,
            listen,
            raw.server.banner,
        ))
    }
}

fn validate_database(cfg: &RawConfigFile) -> Result<()> {
    if let Some(url) = &cfg.database.url {
        if url.trim().is_empty() {
            return Err(InitQError::ConfigError(
                "[database].url must not be empty (omit it instead)".to_string(),
            ));
        }
    }
    Ok(())
}

fn parse_listen(cfg: &RawConfigFile) -> Result<SocketAddr> {
    cfg.server.listen.parse().map_err(|e| {
        InitQError::ConfigError(format!(
            "[server].listen '{}' is not a socket address: {}",
            cfg.server.listen, e
        ))
    })
}
