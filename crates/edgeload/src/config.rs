//! Run and case configuration.
//!
//! [`RunSettings`] holds what is shared by every case of a run.
//! [`CaseConfig`] holds the stage parameters of one case, built from a job
//! list row.

use std::path::{Path, PathBuf};
use std::time::Duration;

use contact_search::{ForceParams, SearchParams};
use liner_io::{JobCase, Settings};
use liner_orient::Orientation;
use liner_reduce::ReduceParams;
use serde::{Deserialize, Serialize};

use crate::error::{EdgeLoadError, EdgeLoadResult};

/// Settings shared by every case of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    /// Run name; results go under `<output_dir>/<case_name>`.
    pub case_name: String,
    /// Job list the cases came from.
    pub job_file: PathBuf,
    /// Geometry file of the liner.
    pub geometry_file: PathBuf,
    /// Liner mesh spacing (mm).
    pub mesh_size: f64,
    /// Steps per contact sweep.
    pub contact_iterations: u32,
    /// Liner output directory.
    pub output_dir: PathBuf,
    /// Wall-clock budget for each case's contact search.
    pub deadline: Option<Duration>,
}

impl RunSettings {
    /// Settings from a settings file, writing under `output_root/<liner folder>`.
    #[must_use]
    pub fn from_settings(settings: &Settings, output_root: &Path) -> Self {
        Self {
            case_name: settings.case_name.clone(),
            job_file: settings.job_file.clone(),
            geometry_file: settings.geometry_file.clone(),
            mesh_size: settings.mesh_size,
            contact_iterations: settings.contact_iterations,
            output_dir: output_root.join(settings.liner_folder()),
            deadline: None,
        }
    }

    /// Set the per-case search deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Directory holding this run's results.
    #[must_use]
    pub fn case_dir(&self) -> PathBuf {
        self.output_dir.join(&self.case_name)
    }
}

/// Parameters of one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseConfig {
    /// 1-based position in the job list.
    pub index: usize,
    /// Case label from the job list.
    pub label: String,
    /// Cup orientation.
    pub orientation: Orientation,
    /// Region reduction.
    pub reduce: ReduceParams,
    /// Contact search.
    pub search: SearchParams,
    /// Force resolution.
    pub force: ForceParams,
    /// Activity profile file.
    pub activity_file: PathBuf,
}

impl CaseConfig {
    /// Build a case from a job list row.
    ///
    /// # Errors
    ///
    /// Returns [`EdgeLoadError::MissingHeadRadius`] when the job asks for the
    /// geometry's radius and `geometry_radius` is `None`.
    pub fn from_job(
        index: usize,
        job: &JobCase,
        settings: &RunSettings,
        geometry_radius: Option<f64>,
    ) -> EdgeLoadResult<Self> {
        let head_radius =
            job.head_radius
                .resolve(geometry_radius)
                .ok_or_else(|| EdgeLoadError::MissingHeadRadius {
                    case: job.case_num.clone(),
                })?;

        let mut search = SearchParams::lateral(
            head_radius,
            job.lateral_mismatch,
            settings.contact_iterations,
        )
        .with_anterior_mismatch(job.anterior_mismatch);
        if let Some(deadline) = settings.deadline {
            search = search.with_deadline(deadline);
        }

        Ok(Self {
            index,
            label: job.case_num.clone(),
            orientation: Orientation {
                lip: job.lip_angle,
                inclination: job.inclination,
                version: job.anteversion,
                tilt: job.operative_version,
            },
            reduce: ReduceParams::lateral(job.lateral_mismatch, settings.mesh_size)
                .with_anterior_mismatch(job.anterior_mismatch),
            search,
            force: ForceParams::new(job.lateral_stiffness, job.anterior_stiffness),
            activity_file: job.activity_file.clone(),
        })
    }

    /// Head radius (mm).
    #[must_use]
    pub const fn head_radius(&self) -> f64 {
        self.search.head_radius
    }
}
