//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Console messages gated by verbosity
//! - [`logging`] - Tracing subscriber setup

pub mod logging;
pub mod output;
