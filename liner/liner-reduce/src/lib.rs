//! Reduction of an oriented liner cloud to its reachable contact region.
//!
//! Runs once per case, after rotation:
//!
//! 1. [`scan_rim`] walks the rim toward the mismatch direction and returns
//!    the rim height there, plus the seed point for the contact search.
//! 2. Points below `rim height - clearance` or on the lateral-negative half
//!    are dropped, then points farther than the band width from the
//!    [`SweepPlane`] are dropped.
//!
//! Neighbour lists of the result only reference surviving points.
//!
//! # Example
//!
//! ```no_run
//! use liner_orient::{rotate_liner, Orientation};
//! use liner_reduce::{reduce_region, ReduceParams};
//! # let master = liner_types::PointCloud::default();
//!
//! let oriented = rotate_liner(&master, &Orientation::inclined(55.0)).unwrap();
//! let reduced = reduce_region(&oriented, &ReduceParams::lateral(4.0, 0.5)).unwrap();
//! println!("{reduced}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod params;
mod plane;
mod result;
mod rim_scan;

pub use error::{ReduceError, ReduceResult};
pub use params::ReduceParams;
pub use plane::SweepPlane;
pub use result::ReductionResult;
pub use rim_scan::{baseline_angle, scan_rim, RimScan};

use liner_orient::RotatedLiner;
use tracing::{info, warn};

/// Reduce an oriented liner to the region the head can reach.
///
/// # Errors
///
/// - [`ReduceError::InvalidParams`] if `params` fail validation
/// - [`ReduceError::EmptyRim`] if the cloud has no edge points
/// - [`ReduceError::NothingLeft`] if the prune discards every point
/// - [`ReduceError::UnknownStart`] if the seed rim point was pruned
pub fn reduce_region(liner: &RotatedLiner, params: &ReduceParams) -> ReduceResult<ReductionResult> {
    params.validate()?;

    let scan = scan_rim(&liner.rim, params.anterior_mismatch, params.lateral_mismatch)?;

    let clearance = params.clearance();
    let (cutoff, cutoff_collapsed) = if scan.rim_height < clearance {
        (scan.rim_height - clearance, false)
    } else {
        (0.0, true)
    };
    if cutoff_collapsed {
        warn!(
            rim_height = scan.rim_height,
            clearance, "Cutoff above rim height, using zero cutoff"
        );
    }

    let plane = SweepPlane::through_mismatch(params.anterior_mismatch, params.lateral_mismatch)
        .ok_or_else(|| ReduceError::InvalidParams {
            reason: "mismatch direction is undefined when both mismatches are zero".to_string(),
        })?;
    let band = params.band_width();

    let mut below_cutoff = 0;
    let mut off_plane = 0;
    let cloud = liner.cloud.retain(|p| {
        if p.position.y < cutoff || p.position.z < 0.0 {
            below_cutoff += 1;
            false
        } else if plane.distance(&p.position) > band {
            off_plane += 1;
            false
        } else {
            true
        }
    });

    if cloud.is_empty() {
        return Err(ReduceError::NothingLeft { cutoff });
    }
    if !cloud.contains(scan.start) {
        return Err(ReduceError::UnknownStart { id: scan.start });
    }

    let result = ReductionResult {
        cloud,
        start_id: scan.start,
        rim_height: scan.rim_height,
        cutoff,
        cutoff_collapsed,
        original_points: liner.cloud.len(),
        below_cutoff,
        off_plane,
    };

    info!(
        original = result.original_points,
        remaining = result.remaining(),
        below_cutoff,
        off_plane,
        cutoff,
        start = %result.start_id,
        "Reduced contact region"
    );

    Ok(result)
}
