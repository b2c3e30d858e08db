// src/engine/coalescer.rs

//! Pure debounce state machine.
//!
//! The coalescer turns the raw event stream into dispatch triggers: the
//! first content change after a quiet period dispatches, and every event
//! that follows inside the debounce window is dropped. It has no channels,
//! no timers of its own and does no IO; callers pass the current time in.
//! The async loop in [`super::runtime`] owns one and drives it.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, trace};

use crate::types::{DispatchTrigger, RawEvent};

/// Default debounce window.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoalescerState {
    /// No window open; the next content change dispatches.
    Idle,
    /// A window is open until `until`; everything is dropped.
    Throttled { until: Instant },
}

#[derive(Debug, Clone)]
pub struct Coalescer {
    window: Duration,
    state: CoalescerState,
}

impl Default for Coalescer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Coalescer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: CoalescerState::Idle,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn state(&self) -> CoalescerState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, CoalescerState::Idle)
    }

    /// End of the open window, if any.
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            CoalescerState::Idle => None,
            CoalescerState::Throttled { until } => Some(until),
        }
    }

    /// Feed one raw event.
    ///
    /// Returns a trigger only when idle and the event is a content change;
    /// the window then opens at `now`. Renames and permission changes are
    /// dropped in every state, and while throttled nothing resets the window.
    pub fn on_event(&mut self, event: RawEvent, now: Instant) -> Option<DispatchTrigger> {
        match self.state {
            CoalescerState::Throttled { .. } => {
                trace!(path = ?event.path, kind = %event.kind, "coalesced");
                None
            }
            CoalescerState::Idle if !event.kind.is_content_change() => {
                trace!(path = ?event.path, kind = %event.kind, "ignored");
                None
            }
            CoalescerState::Idle => {
                self.state = CoalescerState::Throttled {
                    until: now + self.window,
                };
                debug!(path = ?event.path, kind = %event.kind, "dispatch trigger");
                Some(DispatchTrigger {
                    path: event.path,
                    kind: event.kind,
                    at: now,
                })
            }
        }
    }

    /// Restart the open window at `now`.
    ///
    /// Called once the dispatched command has finished, so the window covers
    /// the command's run time plus the full debounce period.
    pub fn restart_window(&mut self, now: Instant) {
        if let CoalescerState::Throttled { .. } = self.state {
            self.state = CoalescerState::Throttled {
                until: now + self.window,
            };
        }
    }

    /// Timer tick. Closes the window once its deadline has passed.
    pub fn on_timer(&mut self, now: Instant) {
        if let CoalescerState::Throttled { until } = self.state {
            if now >= until {
                trace!("debounce window closed");
                self.state = CoalescerState::Idle;
            }
        }
    }
}
