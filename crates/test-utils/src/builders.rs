#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use swatch::config::{CommandSpec, WatchConfig};
use swatch::engine::DEFAULT_DEBOUNCE;
use swatch::fs::mock::MockFileSystem;
use swatch::watch::ExclusionSet;

/// In-memory tree containing the given files (parents created implicitly).
pub fn mock_tree(files: &[&str]) -> MockFileSystem {
    let fs = MockFileSystem::new();
    for f in files {
        fs.add_file(f);
    }
    fs
}

/// Builder for `WatchConfig` to simplify test setup.
///
/// Starts from root `.`, no exclusions and the default debounce window.
pub struct WatchConfigBuilder {
    root: PathBuf,
    exclusions: ExclusionSet,
    program: String,
    args: Vec<String>,
    debounce: Duration,
}

impl WatchConfigBuilder {
    pub fn new(program: &str) -> Self {
        Self {
            root: PathBuf::from("."),
            exclusions: ExclusionSet::new(),
            program: program.to_string(),
            args: Vec::new(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.args.push(arg.to_string());
        self
    }

    pub fn exclude(mut self, path: &str) -> Self {
        self.exclusions.add(path);
        self
    }

    pub fn debounce_ms(mut self, ms: u64) -> Self {
        self.debounce = Duration::from_millis(ms);
        self
    }

    pub fn build(self) -> WatchConfig {
        WatchConfig {
            root: self.root,
            exclusions: self.exclusions,
            command: CommandSpec::new(self.program, self.args),
            debounce: self.debounce,
        }
    }
}
