// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::DefectMode;

/// Command-line arguments for `initq`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "initq",
    version,
    about = "Resolve an application startup sequence through an init queue.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `initq.toml` in the current working directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `INITQ_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// How queue misuse is reported: "fatal" or "error".
    ///
    /// If omitted, `INITQ_DEFECTS` or "fatal" is used.
    #[arg(long, value_name = "MODE")]
    pub defects: Option<DefectMode>,

    /// Always report an unsolvable startup as a list of unresolved tasks,
    /// even when defects are fatal.
    #[arg(long)]
    pub strict: bool,

    /// Print the startup tasks and their explicit ordering, run nothing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
