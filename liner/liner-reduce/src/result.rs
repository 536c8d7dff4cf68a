//! Result types for region reduction.

// Point counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use liner_types::{PointCloud, PointId};

/// Result of region reduction.
#[derive(Debug, Clone)]
pub struct ReductionResult {
    /// The reduced cloud, with neighbour lists pruned to survivors.
    pub cloud: PointCloud,

    /// Seed point for the contact search.
    pub start_id: PointId,

    /// Height of the rim in the mismatch direction (mm).
    pub rim_height: f64,

    /// Height cutoff that was applied (mm).
    pub cutoff: f64,

    /// True when the cutoff fell above the rim and was reset to zero.
    pub cutoff_collapsed: bool,

    /// Number of points before reduction.
    pub original_points: usize,

    /// Points dropped by the height and half-cup filter.
    pub below_cutoff: usize,

    /// Points dropped for lying too far from the sweep plane.
    pub off_plane: usize,
}

impl ReductionResult {
    /// Number of points that survived.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cloud.len()
    }

    /// Fraction of the original points that survived.
    #[must_use]
    pub fn kept_ratio(&self) -> f64 {
        if self.original_points == 0 {
            1.0
        } else {
            self.remaining() as f64 / self.original_points as f64
        }
    }
}

impl std::fmt::Display for ReductionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Reduction: {} → {} points (cutoff {:.3} mm{}, start {})",
            self.original_points,
            self.remaining(),
            self.cutoff,
            if self.cutoff_collapsed { ", collapsed" } else { "" },
            self.start_id
        )
    }
}
