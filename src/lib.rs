// src/lib.rs

//! An application startup queue.
//!
//! Startup is reduced to a set of tasks that each know what they need. A
//! task is offered a chance to run on every pass and reports whether it is
//! [`Done`](types::TaskState::Done), should be tried again
//! ([`Retry`](types::TaskState::Retry)), or hit something it cannot recover
//! from ([`Stopped`](types::TaskState::Stopped)). Because tasks detect their
//! own prerequisites, they can be added to the queue in any order. Where a
//! task has no way to see that a prerequisite finished, it can name it as an
//! explicit dependency instead.
//!
//! See [`queue::InitQueue`] for the resolver and [`boot`] for a complete
//! startup sequence built on it.

pub mod boot;
pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod queue;
pub mod types;

use std::cell::RefCell;

use anyhow::Result;
use tracing::info;

use crate::boot::BootState;
use crate::cli::CliArgs;
use crate::queue::{InitQueue, QueueOptions};

/// High-level entry point used by `main.rs`.
///
/// Builds the startup queue from [`boot`], resolves it and returns what the
/// tasks produced.
pub fn run(args: &CliArgs) -> Result<BootState> {
    let options = match args.defects {
        Some(mode) => QueueOptions::new(mode),
        None => QueueOptions::from_env(),
    };
    let state = RefCell::new(BootState::default());

    {
        let mut q = InitQueue::with_options(options);
        boot::register(&mut q, &state, args);

        if args.dry_run {
            print!("{}", dry_run_report(&q));
            return Ok(BootState::default());
        }

        let result = if args.strict {
            q.try_process()
        } else {
            q.process()
        };

        if let Err(e) = result {
            let failure = state.borrow().failure.clone();
            return Err(match failure {
                Some(why) if e.is_stopped() => {
                    anyhow::Error::new(e).context(format!("startup stopped: {why}"))
                }
                _ => anyhow::Error::new(e),
            });
        }

        info!(passes = q.passes(), "startup complete");
    }

    Ok(state.into_inner())
}

/// Tasks, their explicit dependencies and an order that honours them, as
/// printed by `--dry-run`.
pub fn dry_run_report(q: &InitQueue<'_>) -> String {
    let graph = q.dependency_graph();
    let mut out = String::new();

    out.push_str("initq dry-run\n");
    out.push_str(&format!("  defect_mode = {:?}\n\n", q.options().defect_mode));

    out.push_str(&format!("tasks ({}):\n", q.len()));
    for name in q.labels() {
        out.push_str(&format!("  - {name}\n"));
        let deps = graph.dependencies_of(name);
        if !deps.is_empty() {
            out.push_str(&format!("      after: {:?}\n", deps));
        }
    }

    match q.dependency_order() {
        Ok(order) => out.push_str(&format!("explicit order: {}\n", order.join(" -> "))),
        Err(task) => out.push_str(&format!(
            "explicit dependencies form a cycle through '{task}'\n"
        )),
    }
    out
}
