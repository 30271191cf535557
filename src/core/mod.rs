//! core
//!
//! Domain types for changelog generation.
//!
//! # Modules
//!
//! - [`config`] - Validated run configuration
//! - [`branch`] - Merge-line grammar and branch-name pattern
//! - [`entry`] - Changelog entries and the output document
//!
//! # Design Principles
//!
//! - Nothing here touches the network or spawns processes
//! - Invalid values are rejected at construction time
//! - Rendering is deterministic

pub mod branch;
pub mod config;
pub mod entry;
