use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use swatch::errors::Result;
use swatch::types::{ChangeKind, RawEvent};
use swatch::watch::{EventStreams, NotificationCapability};

/// What the fake backend was asked to do.
#[derive(Debug, Default, Clone)]
pub struct CapabilityLog {
    pub subscribed: Vec<PathBuf>,
    pub closed: usize,
}

/// A notification backend that:
/// - records subscriptions and close calls
/// - refuses to subscribe the paths it was told to reject
/// - never produces events itself; tests push them through [`FakeSource`].
pub struct FakeCapability {
    log: Arc<Mutex<CapabilityLog>>,
    reject: HashSet<PathBuf>,
}

impl NotificationCapability for FakeCapability {
    fn subscribe(&mut self, dir: &Path) -> anyhow::Result<()> {
        if self.reject.contains(dir) {
            anyhow::bail!("cannot watch {:?}", dir);
        }
        self.log.lock().unwrap().subscribed.push(dir.to_path_buf());
        Ok(())
    }

    fn close(&mut self) -> anyhow::Result<()> {
        self.log.lock().unwrap().closed += 1;
        Ok(())
    }
}

/// Test-side handle: the sending ends of the streams plus the log.
pub struct FakeSource {
    events: Option<mpsc::UnboundedSender<RawEvent>>,
    errors: Option<mpsc::UnboundedSender<notify::Error>>,
    log: Arc<Mutex<CapabilityLog>>,
}

impl FakeSource {
    pub fn send(&self, path: impl Into<PathBuf>, kind: ChangeKind) {
        if let Some(tx) = &self.events {
            tx.send(RawEvent::new(path, kind)).expect("event receiver dropped");
        }
    }

    pub fn send_error(&self, msg: &str) {
        if let Some(tx) = &self.errors {
            tx.send(notify::Error::generic(msg)).expect("error receiver dropped");
        }
    }

    /// Drop the event sender; the loop sees a closed event stream once it
    /// has drained what was already sent.
    pub fn close_events(&mut self) {
        self.events = None;
    }

    pub fn close_errors(&mut self) {
        self.errors = None;
    }

    pub fn subscribed(&self) -> Vec<PathBuf> {
        self.log.lock().unwrap().subscribed.clone()
    }

    pub fn close_count(&self) -> usize {
        self.log.lock().unwrap().closed
    }
}

type Factory = Box<dyn FnOnce() -> Result<(FakeCapability, EventStreams)> + Send>;

/// Build a fake backend factory and its test-side handle.
///
/// Paths in `reject` fail to subscribe.
pub fn fake_capability(reject: &[PathBuf]) -> (Factory, FakeSource) {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (error_tx, error_rx) = mpsc::unbounded_channel();
    let log = Arc::new(Mutex::new(CapabilityLog::default()));

    let capability = FakeCapability {
        log: Arc::clone(&log),
        reject: reject.iter().cloned().collect(),
    };
    let streams = EventStreams {
        events: event_rx,
        errors: error_rx,
    };
    let factory: Factory = Box::new(move || Ok((capability, streams)));

    let source = FakeSource {
        events: Some(event_tx),
        errors: Some(error_tx),
        log,
    };
    (factory, source)
}
