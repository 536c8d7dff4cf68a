//! Error types for contact search.

use std::time::Duration;

use liner_types::PointId;
use thiserror::Error;

/// Result type for contact search operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur during contact search.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    /// A cursor or candidate id does not resolve in the cloud.
    ///
    /// Indicates corrupted adjacency from an earlier stage; the case is aborted.
    #[error("cursor point {id} cannot be resolved (increment {increment})")]
    UnresolvedCursor {
        /// The id that failed to resolve.
        id: PointId,
        /// 1-based increment at which it happened.
        increment: u32,
    },

    /// No candidate of the increment lay inside the head footprint.
    #[error("no candidate inside the head footprint at increment {increment}")]
    NoContact {
        /// 1-based increment.
        increment: u32,
    },

    /// The per-case deadline passed before the sweep finished.
    #[error("search deadline exceeded at increment {increment} after {elapsed:?}")]
    DeadlineExceeded {
        /// 1-based increment being searched.
        increment: u32,
        /// Time spent so far.
        elapsed: Duration,
    },

    /// Search or force parameters are unusable.
    #[error("invalid search parameters: {reason}")]
    InvalidParams {
        /// What was wrong.
        reason: String,
    },
}
