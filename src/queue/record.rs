// src/queue/record.rs

//! A single registered task and its resolution state.

use std::fmt;

use crate::types::TaskState;

/// Prototype for a task action.
///
/// Actions are opaque to the queue: whatever they capture (shared state,
/// handles, flags set by other tasks) belongs to the caller.
pub type QFunc<'a> = Box<dyn FnMut() -> TaskState + 'a>;

/// One unit of initialization work plus its bookkeeping.
pub struct TaskRecord<'a> {
    name: String,
    action: QFunc<'a>,
    /// Labels of tasks that must be `Done` before `action` may run. Used
    /// when the action has no other way to see that a prerequisite finished.
    deps: Vec<String>,
    state: TaskState,
}

impl<'a> TaskRecord<'a> {
    pub fn new(name: impl Into<String>, action: QFunc<'a>, deps: Vec<String>) -> Self {
        Self {
            name: name.into(),
            action,
            deps,
            state: TaskState::NotRun,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn deps(&self) -> &[String] {
        &self.deps
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: TaskState) {
        self.state = state;
    }

    /// Invoke the action if it still needs to run.
    ///
    /// `Done` and `Stopped` are terminal: the action is not invoked again and
    /// the stored state is returned as-is.
    pub(crate) fn run(&mut self) -> TaskState {
        if matches!(self.state, TaskState::NotRun | TaskState::Retry) {
            self.state = (self.action)();
        }
        self.state
    }
}

impl fmt::Debug for TaskRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskRecord")
            .field("name", &self.name)
            .field("deps", &self.deps)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
