//! Fatal search errors.
//!
//! Running out of room for the tree or the frontier is the only failure the
//! engine reports through `Err`, whether the allocator refuses or the tree hits
//! the configured node limit. "No solution" and "out of time" are ordinary
//! outcomes, see [`crate::search::Outcome`].

use std::collections::TryReserveError;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// An allocation for a new node or frontier entry failed.
    #[error("memory exhausted while growing the search tree: {0}")]
    OutOfMemory(#[from] TryReserveError),
    #[error("search tree reached its limit of {0} nodes")]
    NodeLimit(usize),
}
