//! One-dimensional interpolants for inverting force to time.
//!
//! Cubic interpolants use not-a-knot end conditions: the third derivative
//! is continuous across the second and penultimate knots. The second
//! derivatives at the knots come from one dense linear solve.

use nalgebra::{DMatrix, DVector};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GaitError, GaitResult};

/// Fewest distinct samples a not-a-knot cubic can be fitted through.
pub const MIN_CUBIC_SAMPLES: usize = 4;

/// Interpolation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InterpolationKind {
    /// Piecewise linear.
    Linear,
    /// Not-a-knot cubic spline.
    Cubic,
}

/// An interpolant over sorted, distinct abscissae.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interpolant {
    kind: InterpolationKind,
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivative at each knot; empty for linear.
    curvature: Vec<f64>,
}

impl Interpolant {
    /// Piecewise-linear interpolant through `(xs[i], ys[i])`.
    ///
    /// Samples may be in any order. Repeated abscissae keep their first
    /// occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`GaitError::Interpolation`] for mismatched lengths, an empty
    /// sample set or non-finite values.
    pub fn linear(xs: &[f64], ys: &[f64]) -> GaitResult<Self> {
        let (xs, ys) = prepare(xs, ys)?;
        Ok(Self {
            kind: InterpolationKind::Linear,
            xs,
            ys,
            curvature: Vec::new(),
        })
    }

    /// Not-a-knot cubic interpolant through `(xs[i], ys[i])`.
    ///
    /// Falls back to [`Interpolant::linear`] with fewer than
    /// [`MIN_CUBIC_SAMPLES`] distinct abscissae.
    ///
    /// # Errors
    ///
    /// As [`Interpolant::linear`], plus a singular spline system.
    pub fn cubic(xs: &[f64], ys: &[f64]) -> GaitResult<Self> {
        let (xs, ys) = prepare(xs, ys)?;
        if xs.len() < MIN_CUBIC_SAMPLES {
            return Ok(Self {
                kind: InterpolationKind::Linear,
                xs,
                ys,
                curvature: Vec::new(),
            });
        }
        let curvature = not_a_knot_curvature(&xs, &ys)?;
        Ok(Self {
            kind: InterpolationKind::Cubic,
            xs,
            ys,
            curvature,
        })
    }

    /// The order actually used.
    #[must_use]
    pub const fn kind(&self) -> InterpolationKind {
        self.kind
    }

    /// Smallest and largest abscissa.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        // prepare() guarantees at least one sample.
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Number of distinct knots.
    #[must_use]
    pub fn knots(&self) -> usize {
        self.xs.len()
    }

    /// Evaluate at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`GaitError::Interpolation`] when `x` lies outside the domain.
    pub fn eval(&self, x: f64) -> GaitResult<f64> {
        let (lo, hi) = self.domain();
        let tol = 1e-9 * (hi - lo).abs().max(1.0);
        if !(x >= lo - tol && x <= hi + tol) {
            return Err(GaitError::Interpolation {
                reason: format!("{x} is outside [{lo}, {hi}]"),
            });
        }
        let n = self.xs.len();
        if n == 1 {
            return Ok(self.ys[0]);
        }
        let x = x.clamp(lo, hi);
        let i = self.xs.partition_point(|&v| v <= x).saturating_sub(1).min(n - 2);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        let h = x1 - x0;

        match self.kind {
            InterpolationKind::Linear => Ok(y0 + (y1 - y0) * (x - x0) / h),
            InterpolationKind::Cubic => {
                let (m0, m1) = (self.curvature[i], self.curvature[i + 1]);
                let a = x1 - x;
                let b = x - x0;
                Ok(m0 * a.powi(3) / (6.0 * h)
                    + m1 * b.powi(3) / (6.0 * h)
                    + (y0 / h - m0 * h / 6.0) * a
                    + (y1 / h - m1 * h / 6.0) * b)
            }
        }
    }
}

/// Sort by abscissa and drop repeated abscissae.
fn prepare(xs: &[f64], ys: &[f64]) -> GaitResult<(Vec<f64>, Vec<f64>)> {
    if xs.len() != ys.len() {
        return Err(GaitError::Interpolation {
            reason: format!("{} abscissae but {} ordinates", xs.len(), ys.len()),
        });
    }
    if xs.is_empty() {
        return Err(GaitError::Interpolation {
            reason: "no samples".to_string(),
        });
    }
    if xs.iter().chain(ys).any(|v| !v.is_finite()) {
        return Err(GaitError::Interpolation {
            reason: "samples must be finite".to_string(),
        });
    }

    let mut pairs: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
    // Stable, so the first of equal abscissae stays first.
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    pairs.dedup_by(|later, earlier| later.0 == earlier.0);

    Ok(pairs.into_iter().unzip())
}

fn not_a_knot_curvature(xs: &[f64], ys: &[f64]) -> GaitResult<Vec<f64>> {
    let n = xs.len();
    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let mut a = DMatrix::<f64>::zeros(n, n);
    let mut rhs = DVector::<f64>::zeros(n);

    a[(0, 0)] = h[1];
    a[(0, 1)] = -(h[0] + h[1]);
    a[(0, 2)] = h[0];

    for i in 1..n - 1 {
        a[(i, i - 1)] = h[i - 1];
        a[(i, i)] = 2.0 * (h[i - 1] + h[i]);
        a[(i, i + 1)] = h[i];
        rhs[i] = 6.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
    }

    a[(n - 1, n - 3)] = h[n - 2];
    a[(n - 1, n - 2)] = -(h[n - 3] + h[n - 2]);
    a[(n - 1, n - 1)] = h[n - 3];

    a.lu()
        .solve(&rhs)
        .map(|m| m.iter().copied().collect())
        .ok_or_else(|| GaitError::Interpolation {
            reason: "spline system is singular".to_string(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_midpoint() {
        let f = Interpolant::linear(&[0.0, 10.0], &[1.0, 3.0]).unwrap();
        assert_relative_eq!(f.eval(5.0).unwrap(), 2.0, epsilon = 1e-12);
        assert_eq!(f.kind(), InterpolationKind::Linear);
    }

    #[test]
    fn descending_samples_are_sorted() {
        let f = Interpolant::linear(&[30.0, 20.0, 10.0], &[0.1, 0.2, 0.3]).unwrap();
        assert_eq!(f.domain(), (10.0, 30.0));
        assert_relative_eq!(f.eval(25.0).unwrap(), 0.15, epsilon = 1e-12);
    }

    #[test]
    fn repeated_abscissa_keeps_first() {
        let f = Interpolant::linear(&[0.0, 5.0, 5.0, 10.0], &[0.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(f.knots(), 3);
        assert_relative_eq!(f.eval(5.0).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn cubic_reproduces_cubic_polynomial() {
        let p = |x: f64| 0.5 * x.powi(3) - 2.0 * x * x + x + 4.0;
        let xs = [0.0, 1.0, 2.5, 3.0, 4.5, 6.0];
        let ys: Vec<f64> = xs.iter().map(|&x| p(x)).collect();
        let f = Interpolant::cubic(&xs, &ys).unwrap();

        assert_eq!(f.kind(), InterpolationKind::Cubic);
        for x in [0.3, 1.7, 2.75, 5.2] {
            assert_relative_eq!(f.eval(x).unwrap(), p(x), epsilon = 1e-9);
        }
    }

    #[test]
    fn four_point_cubic_is_the_interpolating_polynomial() {
        let p = |x: f64| x.powi(3) - x;
        let xs = [-1.0, 0.0, 1.0, 2.0];
        let ys: Vec<f64> = xs.iter().map(|&x| p(x)).collect();
        let f = Interpolant::cubic(&xs, &ys).unwrap();
        assert_relative_eq!(f.eval(0.5).unwrap(), p(0.5), epsilon = 1e-12);
        assert_relative_eq!(f.eval(1.5).unwrap(), p(1.5), epsilon = 1e-12);
    }

    #[test]
    fn short_cubic_falls_back_to_linear() {
        let f = Interpolant::cubic(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
        assert_eq!(f.kind(), InterpolationKind::Linear);
        assert_relative_eq!(f.eval(1.5).unwrap(), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn out_of_domain_is_an_error() {
        let f = Interpolant::linear(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        assert!(f.eval(1.5).is_err());
        assert!(f.eval(f64::NAN).is_err());
        assert!(f.eval(1.0 + 1e-12).is_ok());
    }

    #[test]
    fn single_sample_evaluates_at_its_abscissa() {
        let f = Interpolant::linear(&[7.0], &[0.4]).unwrap();
        assert_eq!(f.eval(7.0).unwrap(), 0.4);
        assert!(f.eval(8.0).is_err());
    }

    #[test]
    fn mismatched_lengths_rejected() {
        assert!(Interpolant::linear(&[0.0, 1.0], &[0.0]).is_err());
        assert!(Interpolant::linear(&[], &[]).is_err());
    }
}
