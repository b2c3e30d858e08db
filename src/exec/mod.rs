// src/exec/mod.rs

//! Command dispatch.
//!
//! - [`dispatcher`] substitutes the triggering path into the argument
//!   template and runs the command, reporting (never propagating) failures.
//! - [`backend`] provides the `ProcessRunner` trait and the
//!   `tokio::process` implementation used in production; tests swap in a
//!   recording fake.

pub mod backend;
pub mod dispatcher;

pub use backend::{ProcessRunner, RealProcessRunner, RunOutcome};
pub use dispatcher::{substitute_args, DispatchOutcome, Dispatcher, PLACEHOLDER};
