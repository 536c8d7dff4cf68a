//! Error types for region reduction.

use liner_types::PointId;
use thiserror::Error;

/// Result type for reduction operations.
pub type ReduceResult<T> = Result<T, ReduceError>;

/// Errors that can occur during region reduction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReduceError {
    /// The oriented cloud has no rim points to start the scan from.
    #[error("cloud has no edge points, cannot locate the rim")]
    EmptyRim,

    /// The converged rim point did not survive the prune.
    #[error("start point {id} was removed by the prune")]
    UnknownStart {
        /// The rim point selected by the scan.
        id: PointId,
    },

    /// Every point was discarded.
    #[error("no points left after pruning (cutoff {cutoff:.3} mm)")]
    NothingLeft {
        /// The height cutoff that was applied.
        cutoff: f64,
    },

    /// Reduction parameters are unusable.
    #[error("invalid reduction parameters: {reason}")]
    InvalidParams {
        /// What was wrong.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_left_message() {
        let err = ReduceError::NothingLeft { cutoff: -4.5 };
        assert_eq!(err.to_string(), "no points left after pruning (cutoff -4.500 mm)");
    }
}
