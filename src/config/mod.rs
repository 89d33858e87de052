// src/config/mod.rs

//! Configuration for the `initq` startup binary.
//!
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate it into an [`AppConfig`] (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, parse_and_validate};
pub use model::{AppConfig, DatabaseSection, RawConfigFile, ServerSection};
