//! git
//!
//! Single interface for all Git operations.
//!
//! See [`interface`] for the implementation.

mod interface;

pub use interface::{Git, GitError};
