// src/exec/backend.rs

//! Pluggable process runner.
//!
//! The dispatcher talks to a `ProcessRunner` instead of spawning processes
//! itself, so tests can record invocations and script failures without
//! touching the OS.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::debug;

/// How a finished process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    /// Non-zero exit. `-1` when the process was killed by a signal.
    Failed(i32),
}

/// Trait abstracting how the user's command is executed.
///
/// `Err` means the program could not be launched or waited on; a program
/// that ran and exited non-zero is `Ok(RunOutcome::Failed(_))`.
pub trait ProcessRunner: Send {
    fn run<'a>(
        &'a mut self,
        program: &'a str,
        args: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<RunOutcome>> + Send + 'a>>;
}

/// Runs commands with `tokio::process`.
///
/// The child's stdout is the watcher's own stdout. Stderr is drained line by
/// line into the log at debug level.
#[derive(Debug, Clone, Default)]
pub struct RealProcessRunner;

impl RealProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for RealProcessRunner {
    fn run<'a>(
        &'a mut self,
        program: &'a str,
        args: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<RunOutcome>> + Send + 'a>> {
        Box::pin(async move {
            let mut cmd = Command::new(program);
            cmd.args(args)
                .stdin(Stdio::null())
                .stdout(Stdio::inherit())
                .stderr(Stdio::piped())
                .kill_on_drop(true);

            let mut child = cmd
                .spawn()
                .with_context(|| format!("spawning '{program}'"))?;

            // Always consume stderr so the pipe never fills up.
            if let Some(stderr) = child.stderr.take() {
                let program = program.to_string();
                tokio::spawn(async move {
                    let mut lines = BufReader::new(stderr).lines();
                    while let Ok(Some(line)) = lines.next_line().await {
                        debug!(program = %program, "stderr: {}", line);
                    }
                });
            }

            let status = child
                .wait()
                .await
                .with_context(|| format!("waiting for '{program}'"))?;

            if status.success() {
                Ok(RunOutcome::Success)
            } else {
                Ok(RunOutcome::Failed(status.code().unwrap_or(-1)))
            }
        })
    }
}
