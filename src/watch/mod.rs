// src/watch/mod.rs

//! Deciding what to watch and subscribing to it.
//!
//! This module is responsible for:
//! - The exclusion set and the path normalization it shares with the scanner.
//! - Walking the tree to find the directories to watch.
//! - Registering those directories with a notification backend (`notify`)
//!   and owning that backend for the session.
//!
//! It does **not** know about debouncing or commands; it only turns a
//! directory tree into a stream of raw events.

pub mod exclusions;
pub mod path_utils;
pub mod scanner;
pub mod subscription;

pub use exclusions::{ExclusionSet, DEFAULT_EXCLUDES};
pub use scanner::scan;
pub use subscription::{EventStreams, NotificationCapability, NotifyCapability, Subscription};
