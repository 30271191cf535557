//! merge-changelog - Release changelogs from merge history
//!
//! Scans local history for merges into master, extracts an issue id from
//! each merged branch name, fetches the issue title from GitHub, and writes
//! a sorted list of entries to a file.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Runs Extract → Parse → Fetch → Write
//! - [`core`] - Configuration, branch parsing, entries and the output document
//! - [`git`] - Single interface for Git operations
//! - [`tracker`] - Abstraction for remote issue trackers (GitHub)
//! - [`ui`] - Console output and logging
//!
//! # Guarantees
//!
//! 1. Configuration is validated before anything is read or written
//! 2. The output file is written only after every lookup succeeded
//! 3. The same entries always produce byte-identical output

pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
pub mod tracker;
pub mod ui;
