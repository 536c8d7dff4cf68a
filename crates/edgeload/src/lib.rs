//! Edge-loading contact analysis of acetabular liners.
//!
//! A rigid spherical head is swept laterally across a liner point cloud.
//! Each increment's contact is resolved into an axial force, placed on the
//! gait cycle of an activity, and written out as a table of timed contacts.
//!
//! This umbrella crate re-exports the stage crates and adds the case
//! pipeline that chains them.
//!
//! # Quick Start
//!
//! ```no_run
//! use edgeload::{run_case, CaseConfig, RunSettings};
//!
//! let settings = edgeload::io::read_settings("Settings_Trial_.csv").unwrap();
//! let run = RunSettings::from_settings(&settings, "output".as_ref());
//! let geometry = edgeload::io::read_geometry(&settings.geometry_file).unwrap();
//! let jobs = edgeload::io::read_job_list(&settings.job_file).unwrap();
//!
//! let config = CaseConfig::from_job(1, &jobs[0], &run, geometry.default_head_radius).unwrap();
//! let outcome = run_case(&geometry.cloud, &config, &run, |_| None).unwrap();
//! println!("{}", outcome.analysis.mapping.taxonomy);
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Surface points, point cloud, contact/force/timed records
//! - [`orient`] - Cup orientation and rim graph
//! - [`reduce`] - Region reduction ahead of the search
//! - [`search`] - Greedy contact search and force resolution
//! - [`gait`] - Activity segmentation and force-to-time mapping
//! - [`io`] - Geometry, activity, job list, settings and result files

#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

/// Surface points, point cloud and per-increment records.
pub use liner_types as types;

/// Cup orientation and rim graph.
pub use liner_orient as orient;

/// Region reduction.
pub use liner_reduce as reduce;

/// Greedy contact search and force resolution.
pub use contact_search as search;

/// Activity segmentation and force-to-time mapping.
pub use gait_profile as gait;

/// Input and output files.
pub use liner_io as io;

mod config;
mod error;
mod pipeline;
mod summary;

pub use config::{CaseConfig, RunSettings};
pub use error::{EdgeLoadError, EdgeLoadResult};
pub use pipeline::{
    analyse_case, archive_parameter_files, run_case, run_cases, CaseAnalysis, CaseOutcome,
    PARAMETER_DIR,
};
pub use summary::{save_summary, write_summary_csv, CaseSummary, SUMMARY_COLUMNS};
