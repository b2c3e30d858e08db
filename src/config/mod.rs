// src/config/mod.rs

//! Configuration loading and validation for swatch.
//!
//! Responsibilities:
//! - Define the TOML-backed file model and the resolved session config
//!   (`model.rs`).
//! - Locate and load the optional config file (`loader.rs`).
//! - Merge it with the command line and check the result (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, resolve_config_file, DEFAULT_CONFIG_FILE};
pub use model::{CommandSpec, RawConfigFile, WatchConfig, WatchSection};
pub use validate::{build_watch_config, command_from_args};
