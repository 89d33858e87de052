// src/boot.rs

//! The startup sequence run by the `initq` binary.
//!
//! Each task checks the shared [`BootState`] for what it needs and returns
//! `Retry` until it is there, so they can be registered in any order:
//!
//! - `cmdline`: decide where the config file lives.
//! - `config`: read and validate it (stops the queue on a bad file).
//! - `dbconn`: connect using the configured database url.
//! - `server`: bind the configured listen address.
//! - `banner`: announce readiness. Nothing in the state tells it the server
//!   is up, so it names `server` as an explicit dependency.

use std::cell::RefCell;
use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::{debug, error, info};

use crate::cli::CliArgs;
use crate::config::{AppConfig, default_config_path, load_and_validate};
use crate::queue::InitQueue;
use crate::types::TaskState;

/// Everything the startup tasks produce.
#[derive(Debug, Default)]
pub struct BootState {
    pub config_path: Option<PathBuf>,
    pub config: Option<AppConfig>,
    pub database: Option<String>,
    pub listen: Option<SocketAddr>,
    pub banner: Option<String>,
    /// Why the queue was stopped, if it was.
    pub failure: Option<String>,
}

/// Register the startup tasks on `q`.
pub fn register<'a>(q: &mut InitQueue<'a>, state: &'a RefCell<BootState>, args: &'a CliArgs) {
    q.add("banner", move || announce(state), &["server"]);
    q.add("server", move || start_server(state), &[]);
    q.add("dbconn", move || connect_database(state), &[]);
    q.add("config", move || read_config(state), &[]);
    q.add("cmdline", move || parse_command_line(state, args), &[]);
}

fn parse_command_line(state: &RefCell<BootState>, args: &CliArgs) -> TaskState {
    let path = args
        .config
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);
    debug!(path = %path.display(), "config path resolved");
    state.borrow_mut().config_path = Some(path);
    TaskState::Done
}

fn read_config(state: &RefCell<BootState>) -> TaskState {
    let mut st = state.borrow_mut();
    let Some(path) = st.config_path.clone() else {
        return TaskState::Retry;
    };

    match load_and_validate(&path) {
        Ok(cfg) => {
            info!(path = %path.display(), "config loaded");
            st.config = Some(cfg);
            TaskState::Done
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "cannot load config");
            st.failure = Some(format!("{}: {e}", path.display()));
            TaskState::Stopped
        }
    }
}

fn connect_database(state: &RefCell<BootState>) -> TaskState {
    let mut st = state.borrow_mut();
    let url = match st.config.as_ref() {
        None => return TaskState::Retry,
        Some(cfg) => match cfg.database_url.clone() {
            Some(url) => url,
            None => {
                debug!("no [database].url configured yet");
                return TaskState::Retry;
            }
        },
    };

    info!(url = %url, "database connection ready");
    st.database = Some(url);
    TaskState::Done
}

fn start_server(state: &RefCell<BootState>) -> TaskState {
    let mut st = state.borrow_mut();
    if st.database.is_none() {
        return TaskState::Retry;
    }
    let Some(listen) = st.config.as_ref().map(|c| c.listen) else {
        return TaskState::Retry;
    };

    info!(%listen, "server configured");
    st.listen = Some(listen);
    TaskState::Done
}

fn announce(state: &RefCell<BootState>) -> TaskState {
    let mut st = state.borrow_mut();
    let Some(banner) = st.config.as_ref().map(|c| c.banner.clone()) else {
        return TaskState::Retry;
    };
    info!("{banner}");
    st.banner = Some(banner);
    TaskState::Done
}
