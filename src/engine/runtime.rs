// src/engine/runtime.rs

use std::fmt;

use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::errors::{Result, SwatchError};
use crate::exec::{Dispatcher, ProcessRunner};
use crate::types::RawEvent;
use crate::watch::EventStreams;

use super::coalescer::Coalescer;

/// Drives the [`Coalescer`] from the notification streams and hands its
/// triggers to a [`Dispatcher`].
///
/// This is the IO shell around the pure coalescer: it owns the receiving
/// ends of the backend's channels and multiplexes them with the debounce
/// deadline. Dispatch is awaited on the loop itself, so events that arrive
/// while the command runs wait in the channel and are handled afterwards, in
/// order.
pub struct WatchLoop<R: ProcessRunner> {
    coalescer: Coalescer,
    streams: EventStreams,
    dispatcher: Dispatcher<R>,
}

impl<R: ProcessRunner> fmt::Debug for WatchLoop<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchLoop")
            .field("coalescer", &self.coalescer)
            .finish_non_exhaustive()
    }
}

impl<R: ProcessRunner> WatchLoop<R> {
    pub fn new(coalescer: Coalescer, streams: EventStreams, dispatcher: Dispatcher<R>) -> Self {
        Self {
            coalescer,
            streams,
            dispatcher,
        }
    }

    /// Main event loop.
    ///
    /// Runs until either stream closes, which is reported as
    /// [`SwatchError::SourceLost`]. Errors delivered on the error stream are
    /// logged and otherwise ignored.
    pub async fn run(mut self) -> Result<()> {
        info!(window = ?self.coalescer.window(), "watch loop started");

        loop {
            let deadline = self.coalescer.deadline();

            tokio::select! {
                biased;

                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.coalescer.on_timer(Instant::now());
                }

                err = self.streams.errors.recv() => match err {
                    Some(err) => warn!(error = %err, "file watch error"),
                    None => {
                        warn!("error stream closed unexpectedly");
                        return Err(SwatchError::SourceLost("error stream closed".to_string()));
                    }
                },

                event = self.streams.events.recv() => match event {
                    Some(event) => self.handle_event(event).await,
                    None => {
                        warn!("event stream closed unexpectedly");
                        return Err(SwatchError::SourceLost("event stream closed".to_string()));
                    }
                },
            }
        }
    }

    async fn handle_event(&mut self, event: RawEvent) {
        debug!(path = ?event.path, kind = %event.kind, "raw event");

        let Some(trigger) = self.coalescer.on_event(event, Instant::now()) else {
            return;
        };

        self.dispatcher.dispatch(&trigger).await;
        self.coalescer.restart_window(Instant::now());
    }
}
