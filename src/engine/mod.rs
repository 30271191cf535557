//! engine
//!
//! Orchestrates one changelog run: Extract -> Parse -> Fetch -> Write.
//!
//! # Lifecycle
//!
//! ```text
//! git log  ->  merge-line grammar  ->  branch pattern  ->  issue lookup  ->  sort + write
//! ```
//!
//! 1. **Extract**: list merge summaries after the cutoff ([`crate::git`])
//! 2. **Parse**: keep lines whose source branch names an issue
//!    ([`crate::core::branch`])
//! 3. **Fetch**: one tracker lookup per kept line, strictly in order
//!    ([`crate::tracker`])
//! 4. **Write**: sort, render, and replace the output file
//!    ([`crate::core::entry`])
//!
//! # Invariants
//!
//! - The output file is touched only after every lookup has succeeded
//! - Lines that do not name an issue are skipped, never fatal
//! - Output depends only on the set of entries, not on fetch order

pub mod pipeline;

pub use pipeline::{
    build_changelog, classify_lines, generate, Classified, MergeMatch, PipelineError, RunReport,
    RunStats,
};

use std::path::PathBuf;

use crate::ui::output::Verbosity;

/// Execution context for a run.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}
