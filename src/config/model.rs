// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::watch::ExclusionSet;

/// Optional configuration file as read from TOML.
///
/// ```toml
/// [watch]
/// exclude = ["target", "dist"]
/// debounce_ms = 300
/// ```
///
/// All sections are optional. Command-line flags take precedence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub watch: WatchSection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    /// Extra exclusions, added to `.git` / `node_modules` and to any `-e`.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Debounce window in milliseconds.
    #[serde(default)]
    pub debounce_ms: Option<u64>,
}

/// The user's command: a program and its argument template.
///
/// Any argument equal to `{}` is a placeholder for the triggering path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Fully resolved configuration for one watch session.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Directory whose tree is watched.
    pub root: PathBuf,
    pub exclusions: ExclusionSet,
    pub command: CommandSpec,
    pub debounce: Duration,
}
