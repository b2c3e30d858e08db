// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwatchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("You must specify a command")]
    NoCommand,

    #[error("Cannot scan {root:?}: {reason}")]
    ScanRoot { root: PathBuf, reason: String },

    #[error("Failed to create file watcher: {0}")]
    Notify(#[from] notify::Error),

    #[error("Notification source lost: {0}")]
    SourceLost(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SwatchError>;
