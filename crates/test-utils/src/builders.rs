#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use initq::queue::{InitQueue, QueueOptions};
use initq::types::{DefectMode, TaskState};

/// Records which task actions were invoked, in order.
///
/// Clones share the same log, so an action can hold one while the test
/// inspects another.
#[derive(Debug, Default, Clone)]
pub struct CallLog {
    calls: Rc<RefCell<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// An action that logs `name` and always returns `result`.
    pub fn action(&self, name: &str, result: TaskState) -> impl FnMut() -> TaskState + 'static {
        let calls = Rc::clone(&self.calls);
        let name = name.to_string();
        move || {
            calls.borrow_mut().push(name.clone());
            result
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == name).count()
    }

    pub fn was_called(&self, name: &str) -> bool {
        self.count(name) > 0
    }
}

/// Static description of a task for [`QueueBuilder`].
#[derive(Debug, Clone)]
struct TaskSpec {
    name: String,
    result: TaskState,
    deps: Vec<String>,
}

/// Builder for queues of fixed-result tasks to simplify test setup.
pub struct QueueBuilder {
    options: QueueOptions,
    tasks: Vec<TaskSpec>,
}

impl QueueBuilder {
    pub fn new() -> Self {
        Self {
            options: QueueOptions::default(),
            tasks: Vec::new(),
        }
    }

    pub fn defect_mode(mut self, mode: DefectMode) -> Self {
        self.options.defect_mode = mode;
        self
    }

    pub fn task(self, name: &str, result: TaskState) -> Self {
        self.task_after(name, result, &[])
    }

    pub fn task_after(mut self, name: &str, result: TaskState, deps: &[&str]) -> Self {
        self.tasks.push(TaskSpec {
            name: name.to_string(),
            result,
            deps: deps.iter().map(|d| d.to_string()).collect(),
        });
        self
    }

    /// Reverse registration order.
    pub fn reversed(mut self) -> Self {
        self.tasks.reverse();
        self
    }

    /// Build the queue; every action records itself in `log`.
    pub fn build(self, log: &CallLog) -> InitQueue<'static> {
        let mut q = InitQueue::with_options(self.options);
        for spec in &self.tasks {
            let deps: Vec<&str> = spec.deps.iter().map(String::as_str).collect();
            q.add(&spec.name, log.action(&spec.name, spec.result), &deps);
        }
        q
    }
}

impl Default for QueueBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Labels `task_0 .. task_{n-1}`.
pub fn chain_labels(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("task_{i}")).collect()
}

/// A chain where each task explicitly depends on the one before it.
pub fn explicit_chain(n: usize) -> QueueBuilder {
    let labels = chain_labels(n);
    let mut builder = QueueBuilder::new();
    for (i, name) in labels.iter().enumerate() {
        builder = match i {
            0 => builder.task(name, TaskState::Done),
            _ => builder.task_after(name, TaskState::Done, &[labels[i - 1].as_str()]),
        };
    }
    builder
}
