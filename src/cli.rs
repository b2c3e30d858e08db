// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `swatch`.
///
/// Options must come before the command; everything from the command onward
/// is passed through untouched, so `swatch -e dist cargo test -q` runs
/// `cargo test -q`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "swatch",
    version,
    about = "Watch a directory and run a command when something in it changes.",
    long_about = None
)]
pub struct CliArgs {
    /// The directory to watch.
    #[arg(short = 'd', long = "directory", value_name = "DIR", default_value = ".")]
    pub directory: PathBuf,

    /// Comma separated list of directories to exclude, relative to the
    /// watched directory. May be repeated. `.git` and `node_modules` are
    /// always excluded.
    #[arg(short = 'e', long = "exclude", value_name = "LIST")]
    pub exclude: Vec<String>,

    /// Debounce window in milliseconds (default 200).
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Path to a TOML config file.
    ///
    /// Default: `Swatch.toml` inside the watched directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve the config and list the directories that would be watched,
    /// without watching or running anything.
    #[arg(long)]
    pub dry_run: bool,

    /// The command to run, followed by its arguments. Any argument that is
    /// exactly `{}` is replaced by the path of the changed file.
    #[arg(
        value_name = "COMMAND",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
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
