// src/config/validate.rs

use std::path::{Component, Path};
use std::time::Duration;

use crate::cli::CliArgs;
use crate::config::model::{CommandSpec, RawConfigFile, WatchConfig};
use crate::engine::DEFAULT_DEBOUNCE;
use crate::errors::{Result, SwatchError};
use crate::watch::ExclusionSet;

/// Merge the command line with the optional config file and check the
/// result.
///
/// - exclusions: defaults, then the file's `exclude`, then every `-e` list
/// - debounce: `--debounce-ms`, else the file's `debounce_ms`, else 200ms
pub fn build_watch_config(args: &CliArgs, file: Option<&RawConfigFile>) -> Result<WatchConfig> {
    let command = command_from_args(&args.command)?;

    let mut exclusions = ExclusionSet::with_defaults();
    if let Some(file) = file {
        for entry in &file.watch.exclude {
            validate_exclusion(entry)?;
        }
        exclusions.extend(&file.watch.exclude);
    }
    for list in &args.exclude {
        for entry in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            validate_exclusion(entry)?;
        }
        exclusions.extend_from_list(list);
    }

    let debounce_ms = args
        .debounce_ms
        .or_else(|| file.and_then(|f| f.watch.debounce_ms));
    let debounce = match debounce_ms {
        Some(0) => {
            return Err(SwatchError::ConfigError(
                "debounce_ms must be >= 1 (got 0)".to_string(),
            ));
        }
        Some(ms) => Duration::from_millis(ms),
        None => DEFAULT_DEBOUNCE,
    };

    Ok(WatchConfig {
        root: args.directory.clone(),
        exclusions,
        command,
        debounce,
    })
}

/// Split `command [args...]` into a [`CommandSpec`].
pub fn command_from_args(command: &[String]) -> Result<CommandSpec> {
    match command.split_first() {
        Some((program, rest)) if !program.trim().is_empty() => {
            Ok(CommandSpec::new(program.clone(), rest.iter().cloned()))
        }
        _ => Err(SwatchError::NoCommand),
    }
}

/// Exclusions are matched against paths relative to the watched directory,
/// so absolute paths and `..` can never match anything.
fn validate_exclusion(entry: &str) -> Result<()> {
    let path = Path::new(entry);
    if path.has_root() {
        return Err(SwatchError::ConfigError(format!(
            "exclusion '{entry}' must be relative to the watched directory"
        )));
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(SwatchError::ConfigError(format!(
            "exclusion '{entry}' must not contain '..'"
        )));
    }
    Ok(())
}
