// src/watch/subscription.rs

//! Registration of watch targets with the notification backend.

use std::fmt;
use std::path::{Path, PathBuf};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::types::RawEvent;

/// Receiving ends of a notification backend.
///
/// Both channels close once the backend is gone; the watch loop treats that
/// as fatal.
#[derive(Debug)]
pub struct EventStreams {
    pub events: mpsc::UnboundedReceiver<RawEvent>,
    pub errors: mpsc::UnboundedReceiver<notify::Error>,
}

/// OS-level change notification, as the rest of the crate sees it.
///
/// Production code uses [`NotifyCapability`]; tests provide a channel-driven
/// fake.
pub trait NotificationCapability: Send {
    /// Start receiving events for the entries directly inside `dir`.
    fn subscribe(&mut self, dir: &Path) -> anyhow::Result<()>;

    /// Release every OS resource held by the backend.
    fn close(&mut self) -> anyhow::Result<()>;
}

/// [`NotificationCapability`] backed by `notify::RecommendedWatcher`.
///
/// Each directory is watched non-recursively; the scanner has already
/// decided which directories belong to the session.
pub struct NotifyCapability {
    watcher: Option<RecommendedWatcher>,
    watched: Vec<PathBuf>,
}

impl fmt::Debug for NotifyCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyCapability")
            .field("watched", &self.watched)
            .finish_non_exhaustive()
    }
}

impl NotifyCapability {
    /// Create the backend and the channels it feeds.
    pub fn create() -> Result<(Self, EventStreams)> {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let (error_tx, error_rx) = mpsc::unbounded_channel::<notify::Error>();

        // Called synchronously on notify's own thread.
        let watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    for raw in RawEvent::from_notify(event) {
                        if event_tx.send(raw).is_err() {
                            // Receiver gone: the watch loop has already exited.
                            return;
                        }
                    }
                }
                Err(err) => {
                    let _ = error_tx.send(err);
                }
            },
            Config::default(),
        )?;

        let capability = Self {
            watcher: Some(watcher),
            watched: Vec::new(),
        };
        let streams = EventStreams {
            events: event_rx,
            errors: error_rx,
        };
        Ok((capability, streams))
    }
}

impl NotificationCapability for NotifyCapability {
    fn subscribe(&mut self, dir: &Path) -> anyhow::Result<()> {
        let watcher = self
            .watcher
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("watcher already closed"))?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        self.watched.push(dir.to_path_buf());
        Ok(())
    }

    fn close(&mut self) -> anyhow::Result<()> {
        if let Some(mut watcher) = self.watcher.take() {
            for dir in self.watched.drain(..) {
                if let Err(err) = watcher.unwatch(&dir) {
                    debug!(dir = ?dir, error = %err, "unwatch failed during close");
                }
            }
            // Dropping the watcher drops the callback and closes both channels.
            drop(watcher);
        }
        Ok(())
    }
}

/// Owns a notification backend for the lifetime of a watch session.
///
/// The backend is released by [`Subscription::close`] or, failing that, when
/// the guard is dropped, so every exit path of the owning scope releases it
/// exactly once.
pub struct Subscription<N: NotificationCapability> {
    capability: Option<N>,
    watched: Vec<PathBuf>,
}

impl<N: NotificationCapability> fmt::Debug for Subscription<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("open", &self.capability.is_some())
            .field("watched", &self.watched)
            .finish()
    }
}

impl<N: NotificationCapability> Subscription<N> {
    /// Create the backend with `create` and subscribe every directory in
    /// `dirs`, in order.
    ///
    /// Fails only when the backend itself cannot be created. A directory that
    /// cannot be subscribed is logged and skipped.
    pub fn open<F>(create: F, dirs: &[PathBuf]) -> Result<(Self, EventStreams)>
    where
        F: FnOnce() -> Result<(N, EventStreams)>,
    {
        let (mut capability, streams) = create()?;

        let mut watched = Vec::with_capacity(dirs.len());
        for dir in dirs {
            match capability.subscribe(dir) {
                Ok(()) => {
                    debug!(dir = ?dir, "subscribed");
                    watched.push(dir.clone());
                }
                Err(err) => {
                    warn!(dir = ?dir, error = %format!("{err:#}"), "directory will not be watched");
                }
            }
        }

        info!(
            watched = watched.len(),
            requested = dirs.len(),
            "file watcher started"
        );

        let subscription = Self {
            capability: Some(capability),
            watched,
        };
        Ok((subscription, streams))
    }

    /// Directories that were successfully subscribed.
    pub fn watched(&self) -> &[PathBuf] {
        &self.watched
    }

    pub fn is_open(&self) -> bool {
        self.capability.is_some()
    }

    /// Release the backend. Later calls do nothing.
    pub fn close(&mut self) {
        if let Some(mut capability) = self.capability.take() {
            if let Err(err) = capability.close() {
                warn!(error = %format!("{err:#}"), "failed to release file watcher");
            }
            debug!("file watcher released");
        }
    }
}

impl<N: NotificationCapability> Drop for Subscription<N> {
    fn drop(&mut self) {
        self.close();
    }
}
