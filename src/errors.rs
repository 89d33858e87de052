// src/errors.rs

//! Crate-wide error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InitQError {
    /// A task action returned `TaskState::Stopped`.
    #[error("run Q early termination")]
    Stopped,

    #[error(transparent)]
    Unresolvable(#[from] Unresolvable),

    /// Queue misuse surfaced as a plain error (`DefectMode::Error`).
    #[error("{0}")]
    Defect(String),

    /// Queue misuse or an unsolvable queue under `DefectMode::Fatal`.
    #[error("fatal: {0}")]
    Fatal(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InitQError {
    /// Whether this error is an assertion-style failure the caller is
    /// expected to halt on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, InitQError::Fatal(_))
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, InitQError::Stopped)
    }

    /// The structured non-convergence error, if this is one.
    pub fn as_unresolvable(&self) -> Option<&Unresolvable> {
        match self {
            InitQError::Unresolvable(u) => Some(u),
            _ => None,
        }
    }
}

/// Returned when the queue cannot be satisfied within its pass budget.
///
/// Carries the labels that never completed so callers can build their own
/// messaging instead of parsing [`Display`](std::fmt::Display) output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", unresolvable_message(.unsat))]
pub struct Unresolvable {
    unsat: Vec<String>,
    cycles: Vec<Vec<String>>,
}

impl Unresolvable {
    pub fn new(unsat: Vec<String>) -> Self {
        Self {
            unsat,
            cycles: Vec::new(),
        }
    }

    /// Attach explicit-dependency cycles found among the registered tasks.
    pub fn with_cycles(mut self, cycles: Vec<Vec<String>>) -> Self {
        self.cycles = cycles;
        self
    }

    /// Labels of the tasks that never reached `Done`, in registration order.
    pub fn unresolved_tasks(&self) -> &[String] {
        &self.unsat
    }

    /// Groups of labels whose explicit dependencies form a cycle.
    pub fn dependency_cycles(&self) -> &[Vec<String>] {
        &self.cycles
    }
}

pub(crate) fn unresolvable_message(unsat: &[String]) -> String {
    if unsat.is_empty() {
        "run Q cannot be satisfied".to_string()
    } else {
        format!("run Q cannot be satisfied ({} remain)", unsat.join(","))
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, InitQError>;
