//! The mismatch sweep.
//!
//! Mismatch shrinks linearly from its maximum to zero over `iterations`
//! steps, giving `iterations + 1` increments. Each value is computed from
//! the increment index rather than by repeated subtraction, so the last
//! increment lands exactly on zero.

use nalgebra::Point3;

use crate::params::SearchParams;

/// Head placement for one sweep increment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactState {
    /// 1-based increment number.
    pub increment: u32,
    /// Lateral mismatch (mm).
    pub lateral_mismatch: f64,
    /// Anterior mismatch (mm).
    pub anterior_mismatch: f64,
    /// Head centre: x = anterior, y = offset, z = lateral.
    pub head_center: Point3<f64>,
}

impl ContactState {
    /// Planar (x, z) distance from the head centre axis to `point`.
    #[must_use]
    pub fn planar_distance(&self, point: &Point3<f64>) -> f64 {
        (point.x - self.head_center.x).hypot(point.z - self.head_center.z)
    }

    /// Vertical gap between `point` and the head surface above it.
    ///
    /// `None` when the point lies outside the head footprint.
    #[must_use]
    pub fn gap(&self, point: &Point3<f64>, head_radius: f64) -> Option<f64> {
        let dx = point.x - self.head_center.x;
        let dz = point.z - self.head_center.z;
        let planar_sq = dx * dx + dz * dz;
        if planar_sq.sqrt() > head_radius {
            return None;
        }
        let surface = (head_radius * head_radius - planar_sq).max(0.0).sqrt() + self.head_center.y;
        Some(point.y - surface)
    }
}

/// Iterator over the increments of a sweep.
#[derive(Debug, Clone)]
pub struct Sweep {
    lateral_max: f64,
    anterior_max: f64,
    head_offset: f64,
    steps: u32,
    next: u32,
}

impl Sweep {
    /// Sweep described by `params`.
    #[must_use]
    pub fn new(params: &SearchParams) -> Self {
        Self {
            lateral_max: params.lateral_mismatch,
            anterior_max: params.anterior_mismatch,
            head_offset: params.head_offset,
            steps: params.iterations,
            next: 0,
        }
    }
}

impl Iterator for Sweep {
    type Item = ContactState;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.steps || self.steps == 0 {
            return None;
        }
        let k = self.next;
        self.next += 1;

        let remaining = f64::from(self.steps - k) / f64::from(self.steps);
        let lateral = self.lateral_max * remaining;
        let anterior = self.anterior_max * remaining;
        Some(ContactState {
            increment: k + 1,
            lateral_mismatch: lateral,
            anterior_mismatch: anterior,
            head_center: Point3::new(anterior, self.head_offset, lateral),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.steps + 1).saturating_sub(self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Sweep {}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn sweep_has_n_plus_one_increments() {
        let params = SearchParams::lateral(10.0, 8.0, 4);
        let states: Vec<ContactState> = Sweep::new(&params).collect();
        assert_eq!(states.len(), 5);
        let lateral: Vec<f64> = states.iter().map(|s| s.lateral_mismatch).collect();
        assert_eq!(lateral, vec![8.0, 6.0, 4.0, 2.0, 0.0]);
        assert_eq!(states[0].increment, 1);
        assert_eq!(states[0].head_center, Point3::new(0.0, -100.0, 8.0));
    }

    #[test]
    fn uneven_step_still_ends_at_zero() {
        let params = SearchParams::lateral(10.0, 4.0, 3);
        let last = Sweep::new(&params).last().unwrap();
        assert_eq!(last.lateral_mismatch, 0.0);
        assert_eq!(Sweep::new(&params).len(), 4);
    }

    #[test]
    fn gap_under_head_apex() {
        let state = Sweep::new(&SearchParams::lateral(10.0, 4.0, 2)).next().unwrap();
        // Directly above the head centre the head surface is at -90.
        let gap = state.gap(&Point3::new(0.0, 0.0, 4.0), 10.0).unwrap();
        assert!((gap - 90.0).abs() < 1e-12);
        // Off to the side the surface is lower, so the gap grows.
        let side = state.gap(&Point3::new(6.0, 0.0, 4.0), 10.0).unwrap();
        assert!((side - 92.0).abs() < 1e-12);
        assert!(state.gap(&Point3::new(0.0, 0.0, 15.0), 10.0).is_none());
    }
}
