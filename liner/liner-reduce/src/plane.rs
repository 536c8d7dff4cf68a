//! The vertical plane swept by the head centre.

use nalgebra::{Point3, Vector3};

/// Height of the third point used to span the vertical plane (mm).
const VERTICAL_SPAN: f64 = 10.0;

/// A plane in 3D space defined by a point and unit normal.
///
/// The plane equation is: `normal · (p - point) = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPlane {
    /// A point on the plane.
    pub point: Point3<f64>,
    /// The plane normal (unit vector).
    pub normal: Vector3<f64>,
}

impl SweepPlane {
    /// Create a plane from three non-collinear points.
    ///
    /// The normal is `(p1 - p0) × (p2 - p0)`, normalized.
    ///
    /// # Returns
    ///
    /// `None` if the points are collinear.
    #[must_use]
    pub fn from_points(p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>) -> Option<Self> {
        let normal = (p1 - p0).cross(&(p2 - p0));
        let norm = normal.norm();
        if norm < f64::EPSILON {
            return None;
        }
        Some(Self {
            point: p0,
            normal: normal / norm,
        })
    }

    /// The vertical plane through the cup centre and the head centre at
    /// maximum mismatch.
    ///
    /// # Returns
    ///
    /// `None` when both mismatches are zero.
    #[must_use]
    pub fn through_mismatch(anterior: f64, lateral: f64) -> Option<Self> {
        Self::from_points(
            Point3::origin(),
            Point3::new(anterior, 0.0, lateral),
            Point3::new(0.0, VERTICAL_SPAN, 0.0),
        )
    }

    /// Signed distance from a point to the plane.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        self.normal.dot(&(point - self.point))
    }

    /// Absolute distance from a point to the plane.
    #[must_use]
    pub fn distance(&self, point: &Point3<f64>) -> f64 {
        self.signed_distance(point).abs()
    }
}
