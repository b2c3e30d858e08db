// src/engine/mod.rs

//! Event coalescing and the watch loop.
//!
//! The pure debounce state machine lives in [`coalescer`]; the async shell
//! that reads the notification streams, fires the debounce timer and awaits
//! dispatches is implemented in [`runtime`].

pub mod coalescer;
pub mod runtime;

pub use coalescer::{Coalescer, CoalescerState, DEFAULT_DEBOUNCE};
pub use runtime::WatchLoop;
