//! Error types for liner orientation.

use thiserror::Error;

/// Result type for orientation operations.
pub type OrientResult<T> = Result<T, OrientError>;

/// Errors that can occur while orienting a liner.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrientError {
    /// An orientation angle is NaN or infinite.
    #[error("{name} angle must be finite, got {value}")]
    NonFiniteAngle {
        /// Which angle was rejected.
        name: &'static str,
        /// The rejected value in degrees.
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_angle() {
        let err = OrientError::NonFiniteAngle {
            name: "inclination",
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "inclination angle must be finite, got NaN");
    }
}
