//! Rigid rotations about the anatomical axes.

use nalgebra::{Matrix3, Point3, Vector3};

/// A rigid rotation represented as a 3x3 matrix.
///
/// Constructors are named after the anatomical axis they turn about, using
/// the liner frame (x anteroposterior, y superoinferior, z mediolateral).
///
/// # Example
///
/// ```
/// use liner_orient::Rotation;
/// use nalgebra::Vector3;
///
/// let quarter = Rotation::about_ap(std::f64::consts::FRAC_PI_2);
/// let v = quarter.transform_vector(&Vector3::new(0.0, 0.0, 1.0));
/// assert!((v.y - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    matrix: Matrix3<f64>,
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Rotation {
    /// Create a rotation from a 3x3 matrix.
    #[must_use]
    pub const fn from_matrix(matrix: Matrix3<f64>) -> Self {
        Self { matrix }
    }

    /// The identity rotation (no change).
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Rotation about the superoinferior (y) axis.
    ///
    /// Maps `(x, z)` to `(x cos a - z sin a, x sin a + z cos a)`.
    ///
    /// # Arguments
    ///
    /// * `angle` - Rotation angle in radians
    #[must_use]
    pub fn about_si(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let matrix = Matrix3::new(
            c,   0.0, -s,
            0.0, 1.0, 0.0,
            s,   0.0, c,
        );
        Self { matrix }
    }

    /// Rotation about the anteroposterior (x) axis.
    ///
    /// Maps `(y, z)` to `(z sin a + y cos a, z cos a - y sin a)`, so a
    /// positive angle inclines the cup opening towards +y.
    ///
    /// # Arguments
    ///
    /// * `angle` - Rotation angle in radians
    #[must_use]
    pub fn about_ap(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let matrix = Matrix3::new(
            1.0, 0.0, 0.0,
            0.0, c,   s,
            0.0, -s,  c,
        );
        Self { matrix }
    }

    /// Rotation within the anteroposterior/superoinferior (x-y) plane.
    ///
    /// Maps `(x, y)` to `(x cos a - y sin a, x sin a + y cos a)`.
    ///
    /// # Arguments
    ///
    /// * `angle` - Rotation angle in radians
    #[must_use]
    pub fn in_ap_si_plane(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let matrix = Matrix3::new(
            c,   -s,  0.0,
            s,   c,   0.0,
            0.0, 0.0, 1.0,
        );
        Self { matrix }
    }

    /// Get the underlying matrix.
    #[must_use]
    pub const fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Compose this rotation with another (self then other).
    #[must_use]
    pub fn then(&self, other: &Self) -> Self {
        Self {
            matrix: other.matrix * self.matrix,
        }
    }

    /// The inverse rotation (transpose).
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            matrix: self.matrix.transpose(),
        }
    }

    /// Rotate a point about the origin.
    #[must_use]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.matrix * point.coords)
    }

    /// Rotate a direction vector.
    ///
    /// Rotations are orthogonal, so normals transform the same way.
    #[must_use]
    pub fn transform_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.matrix * vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn identity_leaves_point() {
        let p = Rotation::identity().transform_point(&Point3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn about_si_quarter_turn() {
        let p = Rotation::about_si(FRAC_PI_2).transform_point(&Point3::new(1.0, 0.0, 0.0));
        // x rotates towards +z
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn about_ap_quarter_turn() {
        let p = Rotation::about_ap(FRAC_PI_2).transform_point(&Point3::new(0.0, 1.0, 0.0));
        // +y rotates towards -z
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn in_plane_quarter_turn() {
        let p = Rotation::in_ap_si_plane(FRAC_PI_2).transform_point(&Point3::new(1.0, 0.0, 5.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn composition_order() {
        // +y goes to -z about AP, then -z goes to +x about SI.
        let r = Rotation::about_ap(FRAC_PI_2).then(&Rotation::about_si(FRAC_PI_2));
        let p = r.transform_point(&Point3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn inverse_undoes_rotation() {
        let r = Rotation::about_ap(0.7).then(&Rotation::about_si(-0.3));
        let v = Vector3::new(0.3, -1.2, 4.0);
        let back = r.inverse().transform_vector(&r.transform_vector(&v));
        assert_relative_eq!(back, v, epsilon = 1e-12);
    }
}
