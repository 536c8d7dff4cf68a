//! Cup orientation angles and the rotation sequence built from them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{OrientError, OrientResult};
use crate::rotation::Rotation;

/// Final cup orientation, all angles in degrees.
///
/// Rotations are applied in a fixed order: lip, inclination, version, tilt.
/// A zero angle contributes no rotation at all.
///
/// # Example
///
/// ```
/// use liner_orient::Orientation;
///
/// let orientation = Orientation::inclined(45.0);
/// assert_eq!(orientation.steps().len(), 1);
/// assert!(Orientation::default().is_identity());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Orientation {
    /// Lip rotation about the superoinferior axis.
    pub lip: f64,
    /// Inclination about the anteroposterior axis.
    pub inclination: f64,
    /// Operative version about the superoinferior axis.
    pub version: f64,
    /// Tilt within the anteroposterior/superoinferior plane.
    pub tilt: f64,
}

impl Orientation {
    /// Orientation with only an inclination angle.
    #[must_use]
    pub fn inclined(inclination: f64) -> Self {
        Self {
            inclination,
            ..Self::default()
        }
    }

    /// Set the lip angle.
    #[must_use]
    pub const fn with_lip(mut self, lip: f64) -> Self {
        self.lip = lip;
        self
    }

    /// Set the inclination angle.
    #[must_use]
    pub const fn with_inclination(mut self, inclination: f64) -> Self {
        self.inclination = inclination;
        self
    }

    /// Set the version angle.
    #[must_use]
    pub const fn with_version(mut self, version: f64) -> Self {
        self.version = version;
        self
    }

    /// Set the tilt angle.
    #[must_use]
    pub const fn with_tilt(mut self, tilt: f64) -> Self {
        self.tilt = tilt;
        self
    }

    /// The orientation that undoes this one when applied afterwards.
    ///
    /// Only exact for a single non-zero angle, since the fixed application
    /// order is not reversed.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            lip: -self.lip,
            inclination: -self.inclination,
            version: -self.version,
            tilt: -self.tilt,
        }
    }

    /// True when every angle is exactly zero.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.steps().is_empty()
    }

    /// Check every angle is finite.
    ///
    /// # Errors
    ///
    /// Returns [`OrientError::NonFiniteAngle`] naming the first bad angle.
    pub fn validate(&self) -> OrientResult<()> {
        for (name, value) in [
            ("lip", self.lip),
            ("inclination", self.inclination),
            ("version", self.version),
            ("tilt", self.tilt),
        ] {
            if !value.is_finite() {
                return Err(OrientError::NonFiniteAngle { name, value });
            }
        }
        Ok(())
    }

    /// The non-identity rotations, in application order.
    #[must_use]
    pub fn steps(&self) -> Vec<Rotation> {
        let mut steps = Vec::with_capacity(4);
        if self.lip != 0.0 {
            steps.push(Rotation::about_si(self.lip.to_radians()));
        }
        if self.inclination != 0.0 {
            steps.push(Rotation::about_ap(self.inclination.to_radians()));
        }
        if self.version != 0.0 {
            // Version turns the opposite way to lip.
            steps.push(Rotation::about_si(-self.version.to_radians()));
        }
        if self.tilt != 0.0 {
            steps.push(Rotation::in_ap_si_plane(self.tilt.to_radians()));
        }
        steps
    }

    /// The composed rotation, or `None` when every angle is zero.
    #[must_use]
    pub fn rotation(&self) -> Option<Rotation> {
        self.steps().into_iter().reduce(|acc, step| acc.then(&step))
    }
}
