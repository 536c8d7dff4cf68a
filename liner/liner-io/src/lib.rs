//! File I/O for liner edge-loading analysis.
//!
//! This crate reads the inputs of an analysis run and writes its results:
//!
//! - **Geometry** - Liner point cloud with labels, rim flags and adjacency
//! - **Activity** - Axial force and head rotations over a gait cycle
//! - **Job list** - One row per case: orientation, mismatch, stiffness, activity
//! - **Settings** - Run-level `key,value` file
//! - **Case output** - Metadata line plus a table of timed contacts
//!
//! All formats are plain comma-separated text.
//!
//! # Example
//!
//! ```no_run
//! use liner_io::{read_activity, read_geometry, read_job_list};
//!
//! let geometry = read_geometry("Liner36.txt").unwrap();
//! let cases = read_job_list("Joblist_Trial_.csv").unwrap();
//! let activity = read_activity(&cases[0].activity_file).unwrap();
//! println!("{} points, {} samples", geometry.cloud.len(), activity.len());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod activity;
mod error;
mod format;
mod geometry;
mod jobs;
mod output;
mod settings;

pub use activity::{
    parse_activity, read_activity, read_activity_with_retry, ACTIVITY_COLUMNS, ACTIVITY_HEADER,
};
pub use error::{IoError, IoResult};
pub use format::float_repr;
pub use geometry::{parse_geometry, read_geometry, LinerGeometry};
pub use jobs::{
    enforce_lateral_only, parse_job_list, read_job_list, HeadRadius, JobCase, JOB_LIST_HEADER,
};
pub use output::{
    point_counts, results_path, save_case_output, write_case_output, CaseMetadata,
    OUTPUT_COLUMNS, RAW_DATA_DIR,
};
pub use settings::{
    find_manual_runs, parse_settings, read_settings, ManualRun, Settings, JOB_LIST_PREFIX,
    SETTINGS_PREFIX,
};
