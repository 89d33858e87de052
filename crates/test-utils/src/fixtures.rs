#![allow(dead_code)]

use std::cell::Cell;

use initq::queue::InitQueue;
use initq::types::TaskState;

/// The data at the heart of a small application.
///
/// Each init step flips a flag once the step it relies on has flipped
/// its own. Real applications hold config structs, connection pools and so
/// on; flags are enough to exercise the queue.
#[derive(Debug, Default)]
pub struct CoreData {
    /// Command line parsed (needed to find the config).
    pub cmdl: Cell<bool>,
    /// Config read from disk.
    pub conf: Cell<bool>,
    /// Database connected (needs config).
    pub data: Cell<bool>,
    /// Server set up (needs database).
    pub serv: Cell<bool>,
    /// Scheduler started (needs server).
    pub schd: Cell<bool>,
    /// When set, `setup_server` reports `Done` without setting `serv`, so
    /// the scheduler can never start.
    pub forget_server_flag: bool,
}

impl CoreData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variant whose server step forgets to record that it finished.
    pub fn forgetful() -> Self {
        Self {
            forget_server_flag: true,
            ..Self::default()
        }
    }

    pub fn parse_command_line(&self) -> TaskState {
        self.cmdl.set(true);
        TaskState::Done
    }

    pub fn read_config_file(&self) -> TaskState {
        if !self.cmdl.get() {
            return TaskState::Retry;
        }
        self.conf.set(true);
        TaskState::Done
    }

    pub fn setup_db_connection(&self) -> TaskState {
        if !self.conf.get() {
            return TaskState::Retry;
        }
        self.data.set(true);
        TaskState::Done
    }

    pub fn setup_server(&self) -> TaskState {
        if !self.data.get() {
            return TaskState::Retry;
        }
        if !self.forget_server_flag {
            self.serv.set(true);
        }
        TaskState::Done
    }

    pub fn start_scheduler(&self) -> TaskState {
        if !self.serv.get() {
            return TaskState::Retry;
        }
        self.schd.set(true);
        TaskState::Done
    }
}

/// Startup step names in dependency order.
pub const STARTUP_STEPS: [&str; 4] = ["cmdline", "config", "dbconn", "server"];

/// Register one of the [`CoreData`] steps by name.
pub fn add_step<'a>(q: &mut InitQueue<'a>, cd: &'a CoreData, step: &str) {
    match step {
        "cmdline" => q.add(step, move || cd.parse_command_line(), &[]),
        "config" => q.add(step, move || cd.read_config_file(), &[]),
        "dbconn" => q.add(step, move || cd.setup_db_connection(), &[]),
        "server" => q.add(step, move || cd.setup_server(), &[]),
        "scheduler" => q.add(step, move || cd.start_scheduler(), &[]),
        other => panic!("unknown startup step {other}"),
    }
}

/// Register the given steps in the given order.
pub fn add_steps<'a>(q: &mut InitQueue<'a>, cd: &'a CoreData, steps: &[&str]) {
    for step in steps {
        add_step(q, cd, step);
    }
}
