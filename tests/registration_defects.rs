// tests/registration_defects.rs
mod common;
use crate::common::init_tracing;

use initq::errors::InitQError;
use initq::queue::{InitQueue, QueueOptions};
use initq::types::{DefectMode, TaskState};
use initq_test_utils::builders::{CallLog, QueueBuilder};

fn error_mode() -> InitQueue<'static> {
    InitQueue::with_options(QueueOptions::new(DefectMode::Error))
}

fn expect_defect(result: Result<(), InitQError>) -> String {
    match result {
        Err(InitQError::Defect(msg)) => msg,
        Err(e) => panic!("Expected Defect error, got: {:?}", e),
        Ok(()) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn self_reference_is_rejected() {
    init_tracing();

    let mut q = error_mode();
    q.add("selfref", || TaskState::Done, &["selfref"]);

    let msg = expect_defect(q.process());
    assert!(msg.contains("add(selfref)"), "got: {msg}");
    assert_eq!(q.passes(), 0);
}

#[test]
fn empty_label_is_rejected() {
    init_tracing();

    let mut q = error_mode();
    q.add("", || TaskState::Done, &[]);

    let msg = expect_defect(q.process());
    assert!(msg.contains("empty task label"), "got: {msg}");
}

#[test]
fn missing_action_is_rejected() {
    init_tracing();

    let mut q = error_mode();
    q.add_boxed("nilfunc", None, &[]);

    let msg = expect_defect(q.try_process());
    assert!(msg.contains("add(nilfunc)"), "got: {msg}");
    assert!(q.is_empty());
}

#[test]
fn unknown_dependency_names_the_missing_label() {
    init_tracing();

    let log = CallLog::new();
    let mut q = QueueBuilder::new()
        .defect_mode(DefectMode::Error)
        .task("cmdline", TaskState::Done)
        .task_after("config", TaskState::Done, &["CmdLine"])
        .build(&log);

    let msg = expect_defect(q.process());
    assert!(msg.contains("unknown dependency"), "got: {msg}");
    assert!(msg.contains("CmdLine"), "got: {msg}");
    assert!(log.calls().is_empty());
}

#[test]
fn typo_in_chained_dependency_is_rejected() {
    init_tracing();

    let log = CallLog::new();
    let mut q = QueueBuilder::new()
        .defect_mode(DefectMode::Error)
        .task_after("black", TaskState::Done, &["white"])
        .task_after("white", TaskState::Done, &["blue"])
        .build(&log);

    let msg = expect_defect(q.process());
    assert!(msg.contains("blue"), "got: {msg}");
}

#[test]
fn duplicate_label_is_rejected() {
    init_tracing();

    let log = CallLog::new();
    let mut q = QueueBuilder::new()
        .defect_mode(DefectMode::Error)
        .task("cmdline", TaskState::Done)
        .task("cmdline", TaskState::Done)
        .build(&log);

    let msg = expect_defect(q.process());
    assert!(msg.contains("duplicate"), "got: {msg}");
    assert!(msg.contains("cmdline"), "got: {msg}");
    assert!(log.calls().is_empty());
}

#[test]
fn first_registration_defect_wins() {
    init_tracing();

    let mut q = error_mode();
    q.add("", || TaskState::Done, &[]);
    q.add("selfref", || TaskState::Done, &["selfref"]);
    q.add_boxed("nilfunc", None, &[]);

    let msg = expect_defect(q.process());
    assert!(msg.contains("empty task label"), "got: {msg}");
}

#[test]
fn registration_defect_prevents_any_task_from_running() {
    init_tracing();

    let log = CallLog::new();
    let mut q = error_mode();
    q.add("good", log.action("good", TaskState::Done), &[]);
    q.add("selfref", log.action("selfref", TaskState::Done), &["selfref"]);

    assert!(q.process().is_err());
    assert!(log.calls().is_empty());
    assert_eq!(q.state_of("good"), Some(TaskState::NotRun));
}

#[test]
fn defects_are_fatal_by_default() {
    init_tracing();

    let log = CallLog::new();
    let mut q = QueueBuilder::new()
        .task("cmdline", TaskState::Done)
        .task_after("config", TaskState::Done, &["CmdLine"])
        .build(&log);

    let err = q.try_process().expect_err("dangling dependency must fail");
    assert!(err.is_fatal());
    assert!(err.to_string().contains("CmdLine"), "got: {err}");
}

#[test]
fn action_returning_not_run_is_a_defect() {
    init_tracing();

    let mut q = error_mode();
    q.add("ok", || TaskState::Done, &[]);
    q.add("weird", || TaskState::NotRun, &[]);

    let msg = expect_defect(q.process());
    assert!(msg.contains("weird"), "got: {msg}");

    let mut q = InitQueue::new();
    q.add("weird", || TaskState::NotRun, &[]);
    assert!(matches!(q.process(), Err(InitQError::Fatal(_))));
}

#[test]
fn defect_mode_parses_from_strings() {
    assert_eq!("fatal".parse::<DefectMode>(), Ok(DefectMode::Fatal));
    assert_eq!(" Error ".parse::<DefectMode>(), Ok(DefectMode::Error));
    assert!("loud".parse::<DefectMode>().is_err());
    assert_eq!(DefectMode::default(), DefectMode::Fatal);
}
