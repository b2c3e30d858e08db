use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use swatch::exec::{ProcessRunner, RunOutcome};

/// One recorded command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

/// Scripted result for the next invocation.
#[derive(Debug, Clone)]
pub enum Scripted {
    Exit(RunOutcome),
    LaunchError(String),
}

/// A fake process runner that:
/// - records every invocation
/// - answers with scripted results in order, then `Success`
/// - optionally takes `delay` of (Tokio) time per run.
#[derive(Clone, Default)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<Invocation>>>,
    script: Arc<Mutex<VecDeque<Scripted>>>,
    delay: Option<Duration>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue the result of the next not-yet-scripted invocation.
    pub fn then(self, result: Scripted) -> Self {
        self.script.lock().unwrap().push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run<'a>(
        &'a mut self,
        program: &'a str,
        args: &'a [String],
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<RunOutcome>> + Send + 'a>> {
        let calls = Arc::clone(&self.calls);
        let script = Arc::clone(&self.script);
        let delay = self.delay;

        Box::pin(async move {
            {
                let mut guard = calls.lock().unwrap();
                guard.push(Invocation {
                    program: program.to_string(),
                    args: args.to_vec(),
                });
            }

            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            let next = script.lock().unwrap().pop_front();
            match next {
                None => Ok(RunOutcome::Success),
                Some(Scripted::Exit(outcome)) => Ok(outcome),
                Some(Scripted::LaunchError(msg)) => Err(anyhow::anyhow!(msg)),
            }
        })
    }
}
