//! Parameters for the contact search and force resolution.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{SearchError, SearchResult};

/// Parameters for the contact search sweep.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchParams {
    /// Head radius (mm).
    pub head_radius: f64,

    /// Vertical position of the head centre (mm). Default: -100.0
    ///
    /// Far enough below the cloud that the head only ever touches it from
    /// underneath.
    pub head_offset: f64,

    /// Number of sweep steps; the sweep has `iterations + 1` increments.
    /// Default: 100
    pub iterations: u32,

    /// Lateral mismatch at the start of the sweep (mm).
    pub lateral_mismatch: f64,

    /// Anterior mismatch at the start of the sweep (mm).
    pub anterior_mismatch: f64,

    /// Wall-clock budget for the whole sweep. Default: None
    pub deadline: Option<Duration>,

    /// Walk passes allowed per increment before the best-so-far is taken.
    /// Default: 10000
    pub max_passes_per_increment: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            head_radius: 14.0,
            head_offset: -100.0,
            iterations: 100,
            lateral_mismatch: 0.0,
            anterior_mismatch: 0.0,
            deadline: None,
            max_passes_per_increment: 10_000,
        }
    }
}

impl SearchParams {
    /// Params for a lateral-only sweep.
    #[must_use]
    pub fn lateral(head_radius: f64, lateral_mismatch: f64, iterations: u32) -> Self {
        Self {
            head_radius,
            lateral_mismatch,
            iterations,
            ..Default::default()
        }
    }

    /// Set the anterior mismatch.
    #[must_use]
    pub const fn with_anterior_mismatch(mut self, mismatch: f64) -> Self {
        self.anterior_mismatch = mismatch;
        self
    }

    /// Set the head centre height.
    #[must_use]
    pub const fn with_head_offset(mut self, offset: f64) -> Self {
        self.head_offset = offset;
        self
    }

    /// Set the sweep deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the per-increment pass limit.
    #[must_use]
    pub const fn with_max_passes(mut self, passes: usize) -> Self {
        self.max_passes_per_increment = passes;
        self
    }

    /// Validate the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidParams`] for a non-positive head radius,
    /// zero iterations, a negative lateral mismatch or non-finite values.
    pub fn validate(&self) -> SearchResult<()> {
        if !(self.head_radius.is_finite() && self.head_radius > 0.0) {
            return Err(SearchError::InvalidParams {
                reason: format!("head radius must be positive, got {}", self.head_radius),
            });
        }
        if self.iterations == 0 {
            return Err(SearchError::InvalidParams {
                reason: "at least one sweep iteration is required".to_string(),
            });
        }
        if !(self.lateral_mismatch.is_finite() && self.lateral_mismatch >= 0.0) {
            return Err(SearchError::InvalidParams {
                reason: format!(
                    "lateral mismatch must be non-negative, got {}",
                    self.lateral_mismatch
                ),
            });
        }
        if !(self.anterior_mismatch.is_finite() && self.head_offset.is_finite()) {
            return Err(SearchError::InvalidParams {
                reason: "anterior mismatch and head offset must be finite".to_string(),
            });
        }
        if self.max_passes_per_increment == 0 {
            return Err(SearchError::InvalidParams {
                reason: "max passes per increment must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Parameters for converting contacts into forces.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ForceParams {
    /// Lateral spring stiffness (N/mm).
    pub lateral_stiffness: f64,

    /// Anterior spring stiffness (N/mm).
    pub anterior_stiffness: f64,

    /// Cap on `|tan θ|`, the axial to tangential force ratio. Default: 1000.0
    pub max_axial_ratio: f64,
}

impl Default for ForceParams {
    fn default() -> Self {
        Self {
            lateral_stiffness: 0.0,
            anterior_stiffness: 0.0,
            max_axial_ratio: 1000.0,
        }
    }
}

impl ForceParams {
    /// Params with both spring stiffnesses.
    #[must_use]
    pub fn new(lateral_stiffness: f64, anterior_stiffness: f64) -> Self {
        Self {
            lateral_stiffness,
            anterior_stiffness,
            ..Default::default()
        }
    }

    /// Set the axial ratio cap.
    #[must_use]
    pub const fn with_max_axial_ratio(mut self, ratio: f64) -> Self {
        self.max_axial_ratio = ratio;
        self
    }

    /// Validate the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidParams`] for negative or non-finite
    /// stiffness, or a non-positive ratio cap.
    pub fn validate(&self) -> SearchResult<()> {
        for (name, value) in [
            ("lateral stiffness", self.lateral_stiffness),
            ("anterior stiffness", self.anterior_stiffness),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SearchError::InvalidParams {
                    reason: format!("{name} must be non-negative, got {value}"),
                });
            }
        }
        if !(self.max_axial_ratio.is_finite() && self.max_axial_ratio > 0.0) {
            return Err(SearchError::InvalidParams {
                reason: format!("max axial ratio must be positive, got {}", self.max_axial_ratio),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = SearchParams::default();
        assert!((params.head_offset + 100.0).abs() < 1e-12);
        assert!(params.deadline.is_none());
        assert!((ForceParams::default().max_axial_ratio - 1000.0).abs() < 1e-12);
    }

    #[test]
    fn zero_iterations_rejected() {
        let params = SearchParams::lateral(14.0, 4.0, 0);
        assert!(matches!(params.validate(), Err(SearchError::InvalidParams { .. })));
    }

    #[test]
    fn negative_stiffness_rejected() {
        assert!(ForceParams::new(-1.0, 0.0).validate().is_err());
        assert!(ForceParams::new(100.0, 0.0).validate().is_ok());
    }
}
