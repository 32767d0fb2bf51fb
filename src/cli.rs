// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `quenchflow`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "quenchflow",
    version,
    about = "Build quench / simulated-annealing task graphs for MD workflows.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the quench request file (TOML).
    ///
    /// Default: `Quench.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Quench.toml")]
    pub config: String,

    /// Write the workflow document here instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub out: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `QUENCHFLOW_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate + build, print a summary of the chains, but don't
    /// emit the workflow document.
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
