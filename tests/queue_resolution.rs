// tests/queue_resolution.rs
mod common;
use crate::common::{TestResult, init_tracing};

use std::cell::Cell;

use initq::queue::InitQueue;
use initq::types::TaskState;
use initq_test_utils::builders::{CallLog, QueueBuilder, chain_labels, explicit_chain};
use initq_test_utils::fixtures::{CoreData, STARTUP_STEPS, add_steps};

#[test]
fn simple_queue_is_satisfied_in_one_pass() -> TestResult {
    init_tracing();

    let log = CallLog::new();
    let mut q = QueueBuilder::new()
        .task("one", TaskState::Done)
        .task("two", TaskState::Done)
        .task("three", TaskState::Done)
        .build(&log);

    q.process()?;

    assert_eq!(q.passes(), 1);
    assert_eq!(log.calls(), vec!["one", "two", "three"]);
    assert!(q.unresolved().is_empty());
    Ok(())
}

#[test]
fn empty_queue_resolves_without_running_anything() -> TestResult {
    init_tracing();

    let mut q = InitQueue::new();
    assert!(q.is_empty());

    q.process()?;
    q.try_process()?;
    assert_eq!(q.passes(), 1);
    Ok(())
}

#[test]
fn startup_in_mostly_correct_order_succeeds() -> TestResult {
    init_tracing();

    let cd = CoreData::new();
    let mut q = InitQueue::new();
    add_steps(&mut q, &cd, &["config", "cmdline", "dbconn", "server"]);

    q.process()?;

    assert!(cd.cmdl.get() && cd.conf.get() && cd.data.get() && cd.serv.get());
    assert_eq!(q.passes(), 2);
    Ok(())
}

#[test]
fn startup_in_reverse_order_succeeds_within_len_passes() -> TestResult {
    init_tracing();

    let cd = CoreData::new();
    let mut q = InitQueue::new();
    let reversed: Vec<&str> = STARTUP_STEPS.iter().rev().copied().collect();
    add_steps(&mut q, &cd, &reversed);

    q.process()?;

    assert!(cd.serv.get());
    assert_eq!(q.passes(), STARTUP_STEPS.len());
    Ok(())
}

#[test]
fn startup_in_reverse_order_succeeds_with_try_process() -> TestResult {
    init_tracing();

    let cd = CoreData::new();
    let mut q = InitQueue::new();
    add_steps(&mut q, &cd, &["server", "dbconn", "config", "cmdline"]);

    q.try_process()?;

    assert!(cd.data.get());
    assert_eq!(q.state_of("server"), Some(TaskState::Done));
    Ok(())
}

#[test]
fn explicit_chain_converges_forwards_and_backwards() -> TestResult {
    init_tracing();

    let log = CallLog::new();
    let mut forward = explicit_chain(4).build(&log);
    forward.process()?;
    assert_eq!(forward.passes(), 1);

    let log = CallLog::new();
    let mut backward = explicit_chain(4).reversed().build(&log);
    backward.process()?;
    assert_eq!(backward.passes(), 4);

    // Dependencies gate invocation, so the chain ran in dependency order.
    assert_eq!(log.calls(), chain_labels(4));
    Ok(())
}

#[test]
fn done_task_is_never_invoked_again() -> TestResult {
    init_tracing();

    let slow_calls = Cell::new(0);
    let fast_calls = Cell::new(0);

    let mut q = InitQueue::new();
    q.add(
        "fast",
        || {
            fast_calls.set(fast_calls.get() + 1);
            TaskState::Done
        },
        &[],
    );
    q.add(
        "slow",
        || {
            slow_calls.set(slow_calls.get() + 1);
            if slow_calls.get() < 3 {
                TaskState::Retry
            } else {
                TaskState::Done
            }
        },
        &[],
    );

    q.process()?;

    assert_eq!(q.passes(), 3);
    assert_eq!(fast_calls.get(), 1);
    assert_eq!(slow_calls.get(), 3);

    // Processing a converged queue runs nothing.
    q.process()?;
    assert_eq!(q.passes(), 1);
    assert_eq!(fast_calls.get(), 1);
    assert_eq!(slow_calls.get(), 3);
    Ok(())
}

#[test]
fn blocked_task_is_marked_retry_without_running() -> TestResult {
    init_tracing();

    let log = CallLog::new();
    let mut q = QueueBuilder::new()
        .task_after("after", TaskState::Done, &["before"])
        .task("before", TaskState::Done)
        .build(&log);

    assert_eq!(q.state_of("after"), Some(TaskState::NotRun));
    q.process()?;

    assert_eq!(q.passes(), 2);
    assert_eq!(log.count("after"), 1);
    assert_eq!(log.calls(), vec!["before", "after"]);
    Ok(())
}

#[test]
fn repeated_dependency_labels_are_accepted() -> TestResult {
    init_tracing();

    let log = CallLog::new();
    let mut q = QueueBuilder::new()
        .task("settime", TaskState::Done)
        .task_after("runsvc", TaskState::Done, &["settime", "settime"])
        .build(&log);

    q.process()?;
    assert_eq!(log.count("runsvc"), 1);
    Ok(())
}

#[test]
fn labels_keep_registration_order() {
    let log = CallLog::new();
    let q = QueueBuilder::new()
        .task("b", TaskState::Done)
        .task("a", TaskState::Done)
        .task("c", TaskState::Done)
        .build(&log);

    assert_eq!(q.len(), 3);
    assert_eq!(q.labels().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    assert_eq!(q.state_of("missing"), None);
}
