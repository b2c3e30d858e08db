// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::model::{RawConfigFile, WatchConfig};
use crate::config::validate::build_watch_config;
use crate::errors::Result;

/// Name of the config file looked up in the watched directory.
pub const DEFAULT_CONFIG_FILE: &str = "Swatch.toml";

/// Load a configuration file from a given path.
///
/// This only performs TOML deserialization; it does **not** merge it with the
/// command line or validate it. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Locate and load the config file for `args`.
///
/// An explicit `--config` must exist. Without it, `Swatch.toml` in the
/// watched directory is used when present; its absence is not an error.
pub fn resolve_config_file(args: &CliArgs) -> Result<Option<RawConfigFile>> {
    if let Some(path) = &args.config {
        debug!(path = ?path, "loading config file");
        return load_from_path(path).map(Some);
    }

    let path = default_config_path(&args.directory);
    if path.is_file() {
        debug!(path = ?path, "loading config file");
        return load_from_path(&path).map(Some);
    }

    Ok(None)
}

/// Build the session configuration from the command line and the optional
/// config file.
///
/// This is the recommended entry point for the rest of the application.
pub fn load_and_validate(args: &CliArgs) -> Result<WatchConfig> {
    let file = resolve_config_file(args)?;
    build_watch_config(args, file.as_ref())
}

/// Default config location for a watched directory.
pub fn default_config_path(root: &Path) -> PathBuf {
    root.join(DEFAULT_CONFIG_FILE)
}
