//! Two-peak load profile segmentation.
//!
//! A two-peak gait trace rises to a first peak, falls to a mid-stance
//! trough, rises to a second peak and falls again. Each phase becomes a
//! [`LoadSegment`] with a force-to-time interpolant. Neighbouring segments
//! share their turning sample, and the last segment also takes the first
//! sample of the trailing minimum-load run.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::activity::ActivityProfile;
use crate::error::{GaitError, GaitResult};
use crate::interpolate::{InterpolationKind, Interpolant};

/// Fewest samples a two-peak trace can have.
pub const MIN_PROFILE_SAMPLES: usize = 5;

/// One of the four monotonic phases of a two-peak gait cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    /// Heel strike up to the first peak.
    FirstRise,
    /// First peak down to the mid-stance trough.
    MidFall,
    /// Trough up to the second peak.
    SecondRise,
    /// Second peak down to toe-off.
    FinalFall,
}

impl Phase {
    /// All phases in cycle order.
    pub const ALL: [Self; 4] = [
        Self::FirstRise,
        Self::MidFall,
        Self::SecondRise,
        Self::FinalFall,
    ];

    /// 1-based phase number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::FirstRise => 1,
            Self::MidFall => 2,
            Self::SecondRise => 3,
            Self::FinalFall => 4,
        }
    }

    /// True for phases whose force increases with time.
    #[must_use]
    pub const fn is_rising(self) -> bool {
        matches!(self, Self::FirstRise | Self::SecondRise)
    }

    /// True for the mid-stance phases between the two peaks.
    #[must_use]
    pub const fn is_stance(self) -> bool {
        matches!(self, Self::MidFall | Self::SecondRise)
    }

    /// Interpolation order used for this phase's force-to-time curve.
    #[must_use]
    pub const fn interpolation(self) -> InterpolationKind {
        if self.is_stance() {
            InterpolationKind::Cubic
        } else {
            InterpolationKind::Linear
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "phase {}", self.number())
    }
}

/// Load levels at the turning points of the cycle (N).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoadLevels {
    /// Load at the first sample.
    pub initial: f64,
    /// First peak.
    pub first_peak: f64,
    /// Mid-stance trough.
    pub trough: f64,
    /// Second peak.
    pub second_peak: f64,
    /// Load at the end of the final fall.
    pub terminal: f64,
    /// Smallest load anywhere in the trace.
    pub minimum: f64,
}

/// A monotonic piece of the load profile.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSegment {
    /// Which phase this is.
    pub phase: Phase,
    /// Sample times (s).
    pub times: Vec<f64>,
    /// Sample forces (N).
    pub forces: Vec<f64>,
    interpolant: Interpolant,
}

impl LoadSegment {
    fn new(phase: Phase, times: Vec<f64>, forces: Vec<f64>) -> GaitResult<Self> {
        let interpolant = match phase.interpolation() {
            InterpolationKind::Linear => Interpolant::linear(&forces, &times)?,
            InterpolationKind::Cubic => Interpolant::cubic(&forces, &times)?,
        };
        Ok(Self {
            phase,
            times,
            forces,
            interpolant,
        })
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True when the segment holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// The force-to-time interpolant.
    #[must_use]
    pub const fn interpolant(&self) -> &Interpolant {
        &self.interpolant
    }

    /// Time at which this phase reaches `force`.
    ///
    /// # Errors
    ///
    /// Returns [`GaitError::Interpolation`] if `force` is outside the segment.
    pub fn time_at(&self, force: f64) -> GaitResult<f64> {
        self.interpolant.eval(force)
    }

    /// True when forces move in the phase's declared direction.
    #[must_use]
    pub fn is_monotonic(&self) -> bool {
        self.forces.windows(2).all(|w| {
            if self.phase.is_rising() {
                w[1] >= w[0]
            } else {
                w[1] <= w[0]
            }
        })
    }
}

/// The four segments of a two-peak profile.
#[derive(Debug, Clone, PartialEq)]
pub struct GaitSegments {
    segments: [LoadSegment; 4],
    /// Turning-point load levels.
    pub levels: LoadLevels,
    /// Index of the last sample of each phase.
    pub turning: [usize; 4],
}

impl GaitSegments {
    /// The segment for `phase`.
    #[must_use]
    pub fn segment(&self, phase: Phase) -> &LoadSegment {
        &self.segments[usize::from(phase.number() - 1)]
    }

    /// All four segments in cycle order.
    #[must_use]
    pub const fn segments(&self) -> &[LoadSegment; 4] {
        &self.segments
    }

    /// Samples over all segments, shared turning samples counted twice.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.segments.iter().map(LoadSegment::len).sum()
    }
}

/// Index of the last sample of the run that starts at `from` and keeps
/// satisfying `continues(current, previous)`.
fn run_end(
    force: &[f64],
    from: usize,
    phase: Phase,
    continues: impl Fn(f64, f64) -> bool,
) -> GaitResult<usize> {
    let mut i = from;
    while i < force.len() && continues(force[i], force[i - 1]) {
        i += 1;
    }
    if i == force.len() && phase != Phase::FinalFall {
        return Err(GaitError::Unsegmentable {
            phase: phase.number(),
            reason: "ran out of samples before the phase ended".to_string(),
        });
    }
    Ok(i - 1)
}

/// Split a two-peak load profile into its four monotonic segments.
///
/// # Errors
///
/// - [`GaitError::TooFewSamples`] for fewer than [`MIN_PROFILE_SAMPLES`] samples
/// - [`GaitError::Unsegmentable`] if a phase runs to the end of the trace
/// - [`GaitError::Interpolation`] if a segment's interpolant cannot be built
///
/// # Example
///
/// ```
/// use gait_profile::{segment_profile, ActivityProfile, Phase};
///
/// let time = vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
/// let force = vec![100.0, 800.0, 500.0, 400.0, 900.0, 300.0, 50.0];
/// let profile = ActivityProfile::new(time, force).unwrap();
///
/// let segments = segment_profile(&profile).unwrap();
/// assert_eq!(segments.turning, [1, 3, 4, 6]);
/// assert_eq!(segments.sample_count(), profile.len() + 3);
/// assert_eq!(segments.segment(Phase::MidFall).forces, vec![800.0, 500.0, 400.0]);
/// ```
pub fn segment_profile(profile: &ActivityProfile) -> GaitResult<GaitSegments> {
    let force = profile.force();
    let time = profile.time();
    if force.len() < MIN_PROFILE_SAMPLES {
        return Err(GaitError::TooFewSamples {
            needed: MIN_PROFILE_SAMPLES,
            got: force.len(),
        });
    }

    let first = run_end(force, 1, Phase::FirstRise, |f, prev| f >= prev)?;
    let second = run_end(force, first + 1, Phase::MidFall, |f, prev| f < prev)?;
    let third = run_end(force, second + 1, Phase::SecondRise, |f, prev| f > prev)?;
    let fourth = run_end(force, third + 1, Phase::FinalFall, |f, prev| f < prev)?;

    let terminal = force[fourth];
    let tail_start = trailing_run_start(force, terminal).unwrap_or(fourth);

    let take = |from: usize, to: usize| (time[from..=to].to_vec(), force[from..=to].to_vec());
    let (t1, f1) = take(0, first);
    let (t2, f2) = take(first, second);
    let (t3, f3) = take(second, third);
    let (mut t4, mut f4) = (
        time[third..fourth].to_vec(),
        force[third..fourth].to_vec(),
    );
    t4.push(time[tail_start]);
    f4.push(force[tail_start]);

    let levels = LoadLevels {
        initial: force[0],
        first_peak: force[first],
        trough: force[second],
        second_peak: force[third],
        terminal,
        minimum: force.iter().copied().fold(f64::INFINITY, f64::min),
    };

    debug!(
        samples = force.len(),
        first_peak = levels.first_peak,
        trough = levels.trough,
        second_peak = levels.second_peak,
        turning = ?[first, second, third, fourth],
        "Segmented load profile"
    );

    Ok(GaitSegments {
        segments: [
            LoadSegment::new(Phase::FirstRise, t1, f1)?,
            LoadSegment::new(Phase::MidFall, t2, f2)?,
            LoadSegment::new(Phase::SecondRise, t3, f3)?,
            LoadSegment::new(Phase::FinalFall, t4, f4)?,
        ],
        levels,
        turning: [first, second, third, fourth],
    })
}

/// Start of the trailing run of samples equal to `level`, if the trace ends on it.
fn trailing_run_start(force: &[f64], level: f64) -> Option<usize> {
    if force.last() != Some(&level) {
        return None;
    }
    let mut k = force.len() - 1;
    while k > 0 && force[k - 1] == level {
        k -= 1;
    }
    Some(k)
}
