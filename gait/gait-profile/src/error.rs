//! Error types for gait profile processing.

use thiserror::Error;

/// Result type for gait profile operations.
pub type GaitResult<T> = Result<T, GaitError>;

/// Errors that can occur while segmenting or inverting a load profile.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GaitError {
    /// Not enough samples for the requested operation.
    #[error("need at least {needed} samples, got {got}")]
    TooFewSamples {
        /// Minimum number of samples.
        needed: usize,
        /// Number supplied.
        got: usize,
    },

    /// Sample channels have different lengths.
    #[error("channel {channel} has {got} samples, expected {expected}")]
    ChannelLength {
        /// Name of the offending channel.
        channel: &'static str,
        /// Its length.
        got: usize,
        /// Length of the time channel.
        expected: usize,
    },

    /// The force trace does not have the two-peak shape.
    #[error("load profile is not two-peak: phase {phase} {reason}")]
    Unsegmentable {
        /// 1-based phase that could not be closed.
        phase: u8,
        /// What went wrong.
        reason: String,
    },

    /// An interpolant was built from bad samples or evaluated out of range.
    #[error("interpolation failed: {reason}")]
    Interpolation {
        /// What went wrong.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsegmentable_message() {
        let err = GaitError::Unsegmentable {
            phase: 3,
            reason: "ran out of samples".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "load profile is not two-peak: phase 3 ran out of samples"
        );
    }
}
