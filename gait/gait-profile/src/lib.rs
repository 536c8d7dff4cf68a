//! Gait load profiles for edge-loading analysis.
//!
//! This crate turns a sampled activity into the time axis contact forces are
//! plotted against:
//!
//! - [`ActivityProfile`] - Force and rotation channels over one gait cycle
//! - [`segment_profile`] - Split a two-peak force trace into four monotonic phases
//! - [`map_times`] - Place contact forces on the cycle and classify edge loading
//! - [`Interpolant`] - Linear and not-a-knot cubic interpolation
//!
//! # Example
//!
//! ```
//! use gait_profile::{map_times, segment_profile, ActivityProfile, ElPhase};
//!
//! let time = vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0];
//! let force = vec![100.0, 1000.0, 500.0, 900.0, 300.0, 100.0];
//! let profile = ActivityProfile::new(time, force).unwrap();
//! let segments = segment_profile(&profile).unwrap();
//!
//! let mapping = map_times(&[], &segments, profile.end_time()).unwrap();
//! assert!(mapping.records.is_empty());
//! assert_eq!(mapping.taxonomy.phase, ElPhase::None);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod activity;
mod error;
mod interpolate;
mod segment;
mod time_map;

pub use activity::ActivityProfile;
pub use error::{GaitError, GaitResult};
pub use interpolate::{Interpolant, InterpolationKind, MIN_CUBIC_SAMPLES};
pub use segment::{
    segment_profile, GaitSegments, LoadLevels, LoadSegment, Phase, MIN_PROFILE_SAMPLES,
};
pub use time_map::{map_times, ElPhase, ElTaxonomy, TimeMapping, TRAILING_RECORDS};
