use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// State of a single task in the init queue.
///
/// Actions return one of these to tell the queue how they went:
///
/// - `Retry`: cannot complete yet (something it needs is not ready).
/// - `Done`: completed; the action is never invoked again.
/// - `Stopped`: unrecoverable; the queue halts right away.
///
/// `NotRun` is the initial state of every task and must never be returned by
/// an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskState {
    #[default]
    NotRun,
    Retry,
    Done,
    Stopped,
}

impl TaskState {
    /// Returns `true` for `Done`.
    pub fn is_done(self) -> bool {
        matches!(self, TaskState::Done)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskState::NotRun => "not-run",
            TaskState::Retry => "retry",
            TaskState::Done => "done",
            TaskState::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// How configuration defects (and, for `InitQueue::process`, an unsolvable
/// queue) are reported.
///
/// - `Fatal`: reported as [`InitQError::Fatal`](crate::errors::InitQError::Fatal).
///   These are mistakes in how the queue was built and are expected to be
///   caught in development. Callers usually halt on them.
/// - `Error`: reported as ordinary errors that can be matched and handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DefectMode {
    #[default]
    Fatal,
    Error,
}

impl FromStr for DefectMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fatal" => Ok(DefectMode::Fatal),
            "error" => Ok(DefectMode::Error),
            other => Err(format!(
                "invalid defect mode: {other} (expected \"fatal\" or \"error\")"
            )),
        }
    }
}
