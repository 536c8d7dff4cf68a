//! Rim walk toward the mismatch direction.
//!
//! Angles are measured in the transverse (x, z) plane from an inferior
//! baseline `(0, -1)`. The walk starts at the first rim point in storage
//! order and moves to whichever rim neighbour most reduces the angular
//! difference to the mismatch direction, stopping at a local minimum.

use liner_orient::RimGraph;
use liner_types::PointId;
use tracing::debug;

use crate::error::{ReduceError, ReduceResult};

/// Outcome of a rim scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RimScan {
    /// Rim point nearest the mismatch direction.
    pub start: PointId,
    /// Height (y) of that point.
    pub rim_height: f64,
    /// Remaining angular difference at convergence (radians).
    pub angle_error: f64,
    /// Number of moves taken.
    pub steps: usize,
}

/// Angle of `(a, b)` from the inferior baseline, in `[0, pi]`.
///
/// `None` for the zero vector.
#[must_use]
pub fn baseline_angle(a: f64, b: f64) -> Option<f64> {
    let length = a.hypot(b);
    if length == 0.0 {
        return None;
    }
    Some((-b / length).clamp(-1.0, 1.0).acos())
}

/// Walk the rim toward the `(anterior, lateral)` mismatch direction.
///
/// # Errors
///
/// Returns [`ReduceError::EmptyRim`] if the rim graph has no nodes, and
/// [`ReduceError::InvalidParams`] for a zero mismatch vector.
pub fn scan_rim(rim: &RimGraph, anterior: f64, lateral: f64) -> ReduceResult<RimScan> {
    let target = baseline_angle(anterior, lateral).ok_or_else(|| ReduceError::InvalidParams {
        reason: "mismatch direction is undefined when both mismatches are zero".to_string(),
    })?;
    let error_of = |x: f64, z: f64| baseline_angle(x, z).map(|a| (target - a).abs());

    let mut cursor = rim.first().ok_or(ReduceError::EmptyRim)?;
    let mut best = error_of(cursor.position.x, cursor.position.z).unwrap_or(f64::INFINITY);
    let mut steps = 0;

    loop {
        let mut next = None;
        for node in cursor
            .neighbors
            .iter()
            .filter(|&&n| n != cursor.id)
            .filter_map(|&n| rim.get(n))
        {
            if let Some(err) = error_of(node.position.x, node.position.z) {
                if err < best {
                    best = err;
                    next = Some(node);
                }
            }
        }
        match next {
            Some(node) => {
                cursor = node;
                steps += 1;
            }
            None => break,
        }
    }

    debug!(
        start = %cursor.id,
        rim_height = cursor.position.y,
        angle_error = best,
        steps,
        "Rim scan converged"
    );

    Ok(RimScan {
        start: cursor.id,
        rim_height: cursor.position.y,
        angle_error: best,
        steps,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use liner_types::{PointCloud, SurfacePoint};
    use nalgebra::{Point3, Vector3};
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    /// Rim ring of `n` points at radius 25, height rising towards +z.
    fn ring(n: u32) -> RimGraph {
        let points = (0..n)
            .map(|i| {
                let a = f64::from(i) * TAU / f64::from(n);
                let (s, c) = a.sin_cos();
                SurfacePoint::new(
                    PointId::new(i + 1),
                    Point3::new(25.0 * c, 2.0 * s, 25.0 * s),
                    Vector3::new(-c, 0.0, -s),
                )
                .with_edge(true)
                .with_neighbors(vec![
                    PointId::new((i + n - 1) % n + 1),
                    PointId::new((i + 1) % n + 1),
                ])
            })
            .collect();
        RimGraph::from_cloud(&PointCloud::from_points(points).unwrap())
    }

    #[test]
    fn baseline_angles() {
        assert!((baseline_angle(0.0, -1.0).unwrap()).abs() < 1e-12);
        assert!((baseline_angle(0.0, 3.0).unwrap() - PI).abs() < 1e-12);
        assert!((baseline_angle(2.0, 0.0).unwrap() - FRAC_PI_2).abs() < 1e-12);
        assert!(baseline_angle(0.0, 0.0).is_none());
    }

    #[test]
    fn lateral_scan_finds_medial_rim_point() {
        // Point 4 of a 12-ring sits at +z.
        let scan = scan_rim(&ring(12), 0.0, 4.0).unwrap();
        assert_eq!(scan.start, PointId::new(4));
        assert!((scan.rim_height - 2.0).abs() < 1e-12);
        assert_eq!(scan.steps, 3);
        assert!(scan.angle_error < 1e-9);
    }

    #[test]
    fn empty_rim_is_an_error() {
        let err = scan_rim(&RimGraph::default(), 0.0, 4.0).unwrap_err();
        assert_eq!(err, ReduceError::EmptyRim);
    }

    #[test]
    fn isolated_first_point_stays_put() {
        let cloud = PointCloud::from_points(vec![SurfacePoint::new(
            PointId::new(9),
            Point3::new(25.0, 0.5, 0.0),
            Vector3::x(),
        )
        .with_edge(true)])
        .unwrap();
        let scan = scan_rim(&RimGraph::from_cloud(&cloud), 0.0, 4.0).unwrap();
        assert_eq!(scan.start, PointId::new(9));
        assert_eq!(scan.steps, 0);
    }
}
