// src/queue/mod.rs

//! The init queue.
//!
//! - [`record`] holds a single registered task and its state.
//! - [`resolver`] owns the tasks and the fixed-point resolution loop.
//! - [`validate`] contains registration and pre-flight checks.
//! - [`graph`] builds a dependency graph for diagnostics.

pub mod graph;
pub mod record;
pub mod resolver;
mod validate;

use serde::Deserialize;
use tracing::warn;

use crate::types::DefectMode;

pub use graph::DepGraph;
pub use record::{QFunc, TaskRecord};
pub use resolver::InitQueue;

/// Environment variable consulted by [`QueueOptions::from_env`].
pub const DEFECTS_ENV: &str = "INITQ_DEFECTS";

/// Per-queue behaviour, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct QueueOptions {
    pub defect_mode: DefectMode,
}

impl QueueOptions {
    pub fn new(defect_mode: DefectMode) -> Self {
        Self { defect_mode }
    }

    /// Options from `INITQ_DEFECTS` ("fatal" or "error"), falling back to
    /// the defaults when unset or invalid.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(DEFECTS_ENV).ok().as_deref())
    }

    /// Options for a raw `INITQ_DEFECTS` value (`None` when unset).
    pub fn from_env_value(value: Option<&str>) -> Self {
        let defect_mode = match value {
            Some(s) => s.parse().unwrap_or_else(|e: String| {
                warn!("{DEFECTS_ENV}: {e}; using default");
                DefectMode::default()
            }),
            None => DefectMode::default(),
        };
        Self { defect_mode }
    }
}
