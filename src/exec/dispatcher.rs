// src/exec/dispatcher.rs

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::CommandSpec;
use crate::exec::backend::{ProcessRunner, RunOutcome};
use crate::types::DispatchTrigger;

/// Placeholder replaced by the triggering path.
pub const PLACEHOLDER: &str = "{}";

const BANNER: &str = "-----------------------------";

/// Replace every argument that is exactly `{}` with `value`.
///
/// Placeholders embedded in a longer argument (`--file={}`) are left alone.
pub fn substitute_args(template: &[String], value: &str) -> Vec<String> {
    template
        .iter()
        .map(|arg| {
            if arg == PLACEHOLDER {
                value.to_string()
            } else {
                arg.clone()
            }
        })
        .collect()
}

/// What happened to a single dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Succeeded,
    Failed(i32),
    LaunchFailed(String),
}

/// Turns dispatch triggers into runs of the configured command.
pub struct Dispatcher<R: ProcessRunner> {
    command: Arc<CommandSpec>,
    runner: R,
}

impl<R: ProcessRunner> std::fmt::Debug for Dispatcher<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}

impl<R: ProcessRunner> Dispatcher<R> {
    pub fn new(command: Arc<CommandSpec>, runner: R) -> Self {
        Self { command, runner }
    }

    /// Run the command for `trigger` and wait for it.
    ///
    /// Failures are logged and returned as an outcome, never as an error:
    /// a broken user command must not stop the watcher.
    pub async fn dispatch(&mut self, trigger: &DispatchTrigger) -> DispatchOutcome {
        println!("{BANNER}");
        println!("{trigger}");
        println!();

        let path = trigger.path.to_string_lossy();
        let args = substitute_args(&self.command.args, &path);

        info!(program = %self.command.program, ?args, "running command");

        match self.runner.run(&self.command.program, &args).await {
            Ok(RunOutcome::Success) => {
                info!(program = %self.command.program, "command finished");
                DispatchOutcome::Succeeded
            }
            Ok(RunOutcome::Failed(code)) => {
                warn!(program = %self.command.program, exit_code = code, "command failed");
                DispatchOutcome::Failed(code)
            }
            Err(err) => {
                let reason = format!("{err:#}");
                error!(program = %self.command.program, error = %reason, "command could not be run");
                DispatchOutcome::LaunchFailed(reason)
            }
        }
    }
}
