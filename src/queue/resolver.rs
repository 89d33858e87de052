// src/queue/resolver.rs

use tracing::{debug, error, info, warn};

use crate::errors::{InitQError, Result, Unresolvable, unresolvable_message};
use crate::queue::QueueOptions;
use crate::queue::graph::DepGraph;
use crate::queue::record::{QFunc, TaskRecord};
use crate::queue::validate::{validate_records, validate_registration};
use crate::types::{DefectMode, TaskState};

/// The init queue: registered tasks plus the fixed-point resolver.
///
/// Tasks may be added in any order. [`process`](Self::process) repeatedly
/// offers every unfinished task a chance to run until all of them report
/// `Done`, one reports `Stopped`, or `len() + 1` passes have gone by.
///
/// ```
/// use std::cell::Cell;
/// use initq::queue::InitQueue;
/// use initq::types::TaskState;
///
/// let cmdline = Cell::new(false);
/// let config = Cell::new(false);
///
/// let mut q = InitQueue::new();
/// q.add("config", || {
///     if !cmdline.get() {
///         return TaskState::Retry;
///     }
///     config.set(true);
///     TaskState::Done
/// }, &[]);
/// q.add("cmdline", || {
///     cmdline.set(true);
///     TaskState::Done
/// }, &[]);
/// q.add("banner", || TaskState::Done, &["config"]);
///
/// q.process().unwrap();
/// assert!(config.get());
/// ```
#[derive(Debug, Default)]
pub struct InitQueue<'a> {
    q: Vec<TaskRecord<'a>>,
    options: QueueOptions,
    /// First registration defect, reported when the queue is processed.
    defect: Option<String>,
    /// Passes used by the most recent resolution.
    passes: usize,
}

/// How a resolution that was not stopped ended.
enum Convergence {
    Converged,
    Exhausted(Vec<String>),
}

impl<'a> InitQueue<'a> {
    /// New, empty queue with default options (defects are fatal).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: QueueOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> QueueOptions {
        self.options
    }

    /// Register a task.
    ///
    /// `name` labels the task in diagnostics and is what other tasks list in
    /// `deps`. `deps` names tasks that must be `Done` before `f` is invoked
    /// at all.
    ///
    /// Invalid input (empty label, self-dependency) does not fail here; it is
    /// recorded and reported by the next `process`/`try_process` call.
    pub fn add<F>(&mut self, name: &str, f: F, deps: &[&str])
    where
        F: FnMut() -> TaskState + 'a,
    {
        self.add_boxed(name, Some(Box::new(f)), deps);
    }

    /// Register a task whose action may be missing.
    ///
    /// A `None` action is a registration defect.
    pub fn add_boxed(&mut self, name: &str, f: Option<QFunc<'a>>, deps: &[&str]) {
        if let Err(msg) = validate_registration(name, f.is_some(), deps) {
            self.record_defect(msg);
            return;
        }
        let Some(f) = f else {
            return;
        };

        let deps = deps.iter().map(|d| d.to_string()).collect();
        self.q.push(TaskRecord::new(name, f, deps));
        debug!(task = %name, total = self.q.len(), "task added to init queue");
    }

    /// Work the queue until every task is `Done`.
    ///
    /// - `Err(InitQError::Stopped)` if a task stopped the queue.
    /// - Registration defects and an unsolvable queue follow the queue's
    ///   [`DefectMode`]: `Fatal` or `Defect`/`Unresolvable`.
    pub fn process(&mut self) -> Result<()> {
        match self.resolve()? {
            Convergence::Converged => Ok(()),
            Convergence::Exhausted(remaining) => match self.options.defect_mode {
                DefectMode::Fatal => {
                    let msg = unresolvable_message(&remaining);
                    error!(remaining = ?remaining, "{msg}");
                    Err(InitQError::Fatal(msg))
                }
                DefectMode::Error => Err(self.unresolvable(remaining).into()),
            },
        }
    }

    /// Like [`process`](Self::process), but an unsolvable queue is always
    /// reported as [`InitQError::Unresolvable`].
    ///
    /// Use this when whether the queue can converge depends on runtime input.
    pub fn try_process(&mut self) -> Result<()> {
        match self.resolve()? {
            Convergence::Converged => Ok(()),
            Convergence::Exhausted(remaining) => Err(self.unresolvable(remaining).into()),
        }
    }

    /// Passes used by the last resolution (0 if validation failed or the
    /// queue was never processed).
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    /// Labels in registration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.q.iter().map(|r| r.name())
    }

    /// Current state of the named task.
    pub fn state_of(&self, name: &str) -> Option<TaskState> {
        self.q.iter().find(|r| r.name() == name).map(|r| r.state())
    }

    /// Labels of tasks not yet `Done`, in registration order.
    pub fn unresolved(&self) -> Vec<String> {
        self.q
            .iter()
            .filter(|r| !r.state().is_done())
            .map(|r| r.name().to_string())
            .collect()
    }

    /// Explicit dependency graph over the registered tasks.
    pub fn dependency_graph(&self) -> DepGraph {
        DepGraph::from_records(&self.q)
    }

    /// A topological order of the tasks over their explicit dependencies,
    /// or the label of a task on a dependency cycle.
    pub fn dependency_order(&self) -> std::result::Result<Vec<String>, String> {
        self.dependency_graph().order()
    }

    fn record_defect(&mut self, msg: String) {
        if self.options.defect_mode == DefectMode::Fatal {
            error!("init queue misuse: {msg}");
        } else {
            warn!("init queue misuse: {msg}");
        }
        // First defect wins.
        if self.defect.is_none() {
            self.defect = Some(msg);
        }
    }

    fn defect_error(&self, msg: String) -> InitQError {
        match self.options.defect_mode {
            DefectMode::Fatal => InitQError::Fatal(msg),
            DefectMode::Error => InitQError::Defect(msg),
        }
    }

    fn unresolvable(&self, remaining: Vec<String>) -> Unresolvable {
        let cycles = self.dependency_graph().cycles();
        warn!(
            remaining = ?remaining,
            cycles = ?cycles,
            passes = self.passes,
            "init queue cannot be satisfied"
        );
        Unresolvable::new(remaining).with_cycles(cycles)
    }

    /// First explicit dependency of task `i` that is not `Done`.
    fn unmet_dependency(&self, i: usize) -> Option<&str> {
        self.q[i]
            .deps()
            .iter()
            .find(|dep| !self.satisfied(dep))
            .map(|dep| dep.as_str())
    }

    /// Whether the named task has completed.
    fn satisfied(&self, name: &str) -> bool {
        self.q
            .iter()
            .any(|r| r.name() == name && r.state().is_done())
    }

    /// The fixed-point loop shared by `process` and `try_process`.
    fn resolve(&mut self) -> Result<Convergence> {
        self.passes = 0;

        if let Some(msg) = self.defect.clone() {
            return Err(self.defect_error(msg));
        }
        validate_records(&self.q).map_err(|msg| self.defect_error(msg))?;

        // Worst case is a dependency chain registered backwards, which
        // completes one link per pass. One more pass confirms it.
        let max_passes = self.q.len() + 1;

        while self.passes < max_passes {
            self.passes += 1;
            let mut converged = true;

            for i in 0..self.q.len() {
                if !self.q[i].state().is_done() {
                    if let Some(dep) = self.unmet_dependency(i) {
                        debug!(
                            task = %self.q[i].name(),
                            dep = %dep,
                            pass = self.passes,
                            "dependency not done; deferring"
                        );
                        self.q[i].set_state(TaskState::Retry);
                        converged = false;
                        continue;
                    }
                }

                let record = &mut self.q[i];
                let state = record.run();
                debug!(task = %record.name(), pass = self.passes, %state, "task ran");

                match state {
                    TaskState::Done => {}
                    TaskState::Retry => converged = false,
                    TaskState::Stopped => {
                        warn!(task = %record.name(), pass = self.passes, "task stopped the init queue");
                        return Err(InitQError::Stopped);
                    }
                    TaskState::NotRun => {
                        let msg = format!("task '{}' returned NotRun", record.name());
                        return Err(self.defect_error(msg));
                    }
                }
            }

            if converged {
                info!(
                    tasks = self.q.len(),
                    passes = self.passes,
                    "init queue satisfied"
                );
                return Ok(Convergence::Converged);
            }
        }

        Ok(Convergence::Exhausted(self.unresolved()))
    }
}
