//! Parameters for region reduction.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ReduceError, ReduceResult};

/// Parameters for region reduction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReduceParams {
    /// Maximum lateral mismatch of the sweep (mm).
    pub lateral_mismatch: f64,

    /// Maximum anterior mismatch of the sweep (mm).
    pub anterior_mismatch: f64,

    /// Approximate point spacing of the cloud (mm). Default: 0.5
    pub mesh_size: f64,

    /// Assumed rim fillet radius (mm). Default: 2.0
    pub fillet_radius: f64,

    /// Half-width of the kept band around the sweep plane, in mesh spacings.
    /// Default: 10.0
    pub band_spacings: f64,
}

impl Default for ReduceParams {
    fn default() -> Self {
        Self {
            lateral_mismatch: 0.0,
            anterior_mismatch: 0.0,
            mesh_size: 0.5,
            fillet_radius: 2.0,
            band_spacings: 10.0,
        }
    }
}

impl ReduceParams {
    /// Params for a lateral-only sweep.
    #[must_use]
    pub fn lateral(lateral_mismatch: f64, mesh_size: f64) -> Self {
        Self {
            lateral_mismatch,
            mesh_size,
            ..Default::default()
        }
    }

    /// Set the anterior mismatch.
    #[must_use]
    pub const fn with_anterior_mismatch(mut self, mismatch: f64) -> Self {
        self.anterior_mismatch = mismatch;
        self
    }

    /// Set the fillet radius.
    #[must_use]
    pub const fn with_fillet_radius(mut self, radius: f64) -> Self {
        self.fillet_radius = radius;
        self
    }

    /// Set the plane band width in mesh spacings.
    #[must_use]
    pub const fn with_band_spacings(mut self, spacings: f64) -> Self {
        self.band_spacings = spacings;
        self
    }

    /// Vertical clearance below the rim that stays in the cloud.
    #[must_use]
    pub fn clearance(&self) -> f64 {
        3.0 + 2.0 * self.fillet_radius
    }

    /// Distance from the sweep plane beyond which points are dropped.
    #[must_use]
    pub fn band_width(&self) -> f64 {
        self.band_spacings * self.mesh_size
    }

    /// Validate the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ReduceError::InvalidParams`] for a zero mismatch direction,
    /// a non-positive mesh size or a negative fillet radius.
    pub fn validate(&self) -> ReduceResult<()> {
        let finite = [
            self.lateral_mismatch,
            self.anterior_mismatch,
            self.mesh_size,
            self.fillet_radius,
            self.band_spacings,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(ReduceError::InvalidParams {
                reason: "parameters must be finite".to_string(),
            });
        }
        if self.lateral_mismatch == 0.0 && self.anterior_mismatch == 0.0 {
            return Err(ReduceError::InvalidParams {
                reason: "mismatch direction is undefined when both mismatches are zero"
                    .to_string(),
            });
        }
        if self.mesh_size <= 0.0 {
            return Err(ReduceError::InvalidParams {
                reason: format!("mesh size must be positive, got {}", self.mesh_size),
            });
        }
        if self.fillet_radius < 0.0 {
            return Err(ReduceError::InvalidParams {
                reason: format!("fillet radius must be non-negative, got {}", self.fillet_radius),
            });
        }
        Ok(())
    }
}
