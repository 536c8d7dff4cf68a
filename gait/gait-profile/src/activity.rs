//! Activity load profile samples.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GaitError, GaitResult};
use crate::interpolate::Interpolant;

/// A sampled activity: axial force and head rotations over one gait cycle.
///
/// Rotation channels are in radians: abduction/adduction (AA),
/// flexion/extension (FE) and internal/external rotation (IE).
///
/// # Example
///
/// ```
/// use gait_profile::ActivityProfile;
///
/// let profile = ActivityProfile::new(vec![0.0, 0.5, 1.0], vec![100.0, 900.0, 100.0]).unwrap();
/// assert_eq!(profile.len(), 3);
/// assert_eq!(profile.end_time(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActivityProfile {
    time: Vec<f64>,
    force: Vec<f64>,
    abduction: Vec<f64>,
    flexion: Vec<f64>,
    rotation: Vec<f64>,
}

impl ActivityProfile {
    /// Profile with force only; rotation channels are zero.
    ///
    /// # Errors
    ///
    /// Returns [`GaitError::TooFewSamples`] for an empty profile and
    /// [`GaitError::ChannelLength`] when `force` and `time` differ in length.
    pub fn new(time: Vec<f64>, force: Vec<f64>) -> GaitResult<Self> {
        if time.is_empty() {
            return Err(GaitError::TooFewSamples { needed: 1, got: 0 });
        }
        check_len("force", &force, time.len())?;
        let zeros = vec![0.0; time.len()];
        Ok(Self {
            time,
            force,
            abduction: zeros.clone(),
            flexion: zeros.clone(),
            rotation: zeros,
        })
    }

    /// Attach the three rotation channels (radians).
    ///
    /// # Errors
    ///
    /// Returns [`GaitError::ChannelLength`] if a channel length differs from
    /// the time channel.
    pub fn with_rotations(
        mut self,
        abduction: Vec<f64>,
        flexion: Vec<f64>,
        rotation: Vec<f64>,
    ) -> GaitResult<Self> {
        check_len("AA", &abduction, self.time.len())?;
        check_len("FE", &flexion, self.time.len())?;
        check_len("IE", &rotation, self.time.len())?;
        self.abduction = abduction;
        self.flexion = flexion;
        self.rotation = rotation;
        Ok(self)
    }

    /// Sample times (s).
    #[must_use]
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Axial force samples (N).
    #[must_use]
    pub fn force(&self) -> &[f64] {
        &self.force
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// True when there are no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Latest sample time (s).
    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.time.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Head rotations `(AA, FE, IE)` at time `t`, linearly interpolated.
    ///
    /// # Errors
    ///
    /// Returns [`GaitError::Interpolation`] when `t` is outside the sampled range.
    pub fn rotations_at(&self, t: f64) -> GaitResult<Vector3<f64>> {
        let aa = Interpolant::linear(&self.time, &self.abduction)?.eval(t)?;
        let fe = Interpolant::linear(&self.time, &self.flexion)?.eval(t)?;
        let ie = Interpolant::linear(&self.time, &self.rotation)?.eval(t)?;
        Ok(Vector3::new(aa, fe, ie))
    }
}

fn check_len(channel: &'static str, values: &[f64], expected: usize) -> GaitResult<()> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(GaitError::ChannelLength {
            channel,
            got: values.len(),
            expected,
        })
    }
}
