// src/config/model.rs

use std::net::SocketAddr;

use serde::Deserialize;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [database]
/// url = "postgres://localhost/app"
///
/// [server]
/// listen = "127.0.0.1:8080"
/// banner = "app ready"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub database: DatabaseSection,

    #[serde(default)]
    pub server: ServerSection,
}

/// `[database]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DatabaseSection {
    /// Connection string. While unset, the `dbconn` startup task cannot
    /// complete.
    #[serde(default)]
    pub url: Option<String>,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Message logged once the server is up.
    #[serde(default)]
    pub banner: Option<String>,
}

fn default_listen() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            banner: None,
        }
    }
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub listen: SocketAddr,
    pub banner: String,
}

impl AppConfig {
    /// Build from already-checked parts. Used by the `TryFrom` impl in
    /// `validate.rs`.
    pub(crate) fn new_unchecked(
        database_url: Option<String>,
        listen: SocketAddr,
        banner: Option<String>,
    ) -> Self {
        Self {
            database_url,
            banner: banner.unwrap_or_else(|| format!("listening on {listen}")),
            listen,
        }
    }
}
