//! The per-case analysis pipeline.
//!
//! rotate → reduce → search → force → segment → time map → write.
//!
//! Cases share the master cloud by reference and nothing else, so
//! [`run_cases`] runs them on the rayon pool.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use contact_search::{resolve_forces, search_contacts, SearchOutcome};
use gait_profile::{map_times, segment_profile, ActivityProfile, TimeMapping};
use liner_io::{read_activity_with_retry, save_case_output, CaseMetadata, IoError};
use liner_orient::rotate_liner;
use liner_reduce::{reduce_region, ReductionResult};
use liner_types::PointCloud;
use rayon::prelude::*;
use tracing::{info, info_span, warn};

use crate::config::{CaseConfig, RunSettings};
use crate::error::EdgeLoadResult;
use crate::summary::CaseSummary;

/// Everything a case produced, before anything is written.
#[derive(Debug, Clone)]
pub struct CaseAnalysis {
    /// Reduced cloud and start point.
    pub reduction: ReductionResult,
    /// Contact search statistics and raw contacts.
    pub search: SearchOutcome,
    /// Timed records and edge-loading classification.
    pub mapping: TimeMapping,
}

/// A finished case.
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    /// The case's configuration.
    pub config: CaseConfig,
    /// Stage results.
    pub analysis: CaseAnalysis,
    /// Result file written.
    pub results_path: PathBuf,
    /// Wall time of the case.
    pub runtime: Duration,
}

impl CaseOutcome {
    /// Summary row for this case, if it produced any timed records.
    #[must_use]
    pub fn summary(&self) -> Option<CaseSummary> {
        let file = self
            .results_path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        CaseSummary::from_mapping(&file, self.config.orientation.inclination, &self.analysis.mapping)
    }
}

/// Run the analysis stages of one case without touching the filesystem.
///
/// # Errors
///
/// Returns the first stage error: bad orientation angles, a failed
/// reduction, a failed or timed-out contact search, or an activity that is
/// not a two-peak profile.
pub fn analyse_case(
    master: &PointCloud,
    config: &CaseConfig,
    activity: &ActivityProfile,
) -> EdgeLoadResult<CaseAnalysis> {
    config.search.validate()?;
    config.force.validate()?;

    let rotated = rotate_liner(master, &config.orientation)?;
    let reduction = reduce_region(&rotated, &config.reduce)?;
    let search = search_contacts(&reduction.cloud, reduction.start_id, &config.search)?;
    if !search.is_reliable() {
        warn!(
            case = %config.label,
            low_confidence = search.low_confidence_count(),
            "Contact search left its neighbourhood"
        );
    }
    let forces = resolve_forces(&search.records, &config.force);

    let segments = segment_profile(activity)?;
    let mapping = map_times(&forces, &segments, activity.end_time())?;
    if mapping.unmapped > 0 {
        warn!(
            case = %config.label,
            unmapped = mapping.unmapped,
            "Some contact forces fall outside the activity load range"
        );
    }

    Ok(CaseAnalysis {
        reduction,
        search,
        mapping,
    })
}

/// Run one case end to end: read its activity, analyse, write results.
///
/// `correct_activity` is asked once for a replacement if the activity file
/// has the wrong header or columns.
///
/// # Errors
///
/// Any reading, stage or writing error.
pub fn run_case<F>(
    master: &PointCloud,
    config: &CaseConfig,
    settings: &RunSettings,
    correct_activity: F,
) -> EdgeLoadResult<CaseOutcome>
where
    F: FnOnce(&Path) -> Option<PathBuf>,
{
    let _span = info_span!("case", index = config.index, label = %config.label).entered();
    let started = Instant::now();

    let activity = read_activity_with_retry(&config.activity_file, correct_activity)?;
    let analysis = analyse_case(master, config, &activity)?;
    let runtime = started.elapsed();

    let metadata = CaseMetadata {
        geometry_file: settings.geometry_file.clone(),
        head_radius: config.head_radius(),
        inclination: config.orientation.inclination,
        version: config.orientation.version,
        tilt: config.orientation.tilt,
        lip: config.orientation.lip,
        anterior_mismatch: config.search.anterior_mismatch,
        anterior_stiffness: config.force.anterior_stiffness,
        lateral_mismatch: config.search.lateral_mismatch,
        lateral_stiffness: config.force.lateral_stiffness,
        mesh_size: settings.mesh_size,
        runtime,
        activity_file: config.activity_file.clone(),
    };
    let results_path = save_case_output(
        &settings.output_dir,
        &settings.case_name,
        config.index,
        &metadata,
        &analysis.mapping.records,
    )?;

    info!(
        records = analysis.mapping.records.len(),
        taxonomy = %analysis.mapping.taxonomy,
        elapsed_ms = runtime.as_millis(),
        "Case complete"
    );
    Ok(CaseOutcome {
        config: config.clone(),
        analysis,
        results_path,
        runtime,
    })
}

/// Run every case in parallel. Results come back in `configs` order.
pub fn run_cases<F>(
    master: &PointCloud,
    configs: &[CaseConfig],
    settings: &RunSettings,
    correct_activity: F,
) -> Vec<EdgeLoadResult<CaseOutcome>>
where
    F: Fn(&Path) -> Option<PathBuf> + Sync,
{
    info!(cases = configs.len(), points = master.len(), "Starting run");
    configs
        .par_iter()
        .map(|config| run_case(master, config, settings, &correct_activity))
        .collect()
}

/// Directory under a run's case directory holding copies of its inputs.
pub const PARAMETER_DIR: &str = "Analysis Parameter Files";

/// Copy the run's settings and job list next to its results.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a file cannot be
/// copied.
pub fn archive_parameter_files(case_dir: &Path, files: &[&Path]) -> EdgeLoadResult<PathBuf> {
    let dir = case_dir.join(PARAMETER_DIR);
    std::fs::create_dir_all(&dir).map_err(IoError::from)?;
    for file in files {
        let Some(name) = file.file_name() else {
            continue;
        };
        std::fs::copy(file, dir.join(name)).map_err(IoError::from)?;
    }
    info!(dir = %dir.display(), files = files.len(), "Archived run parameters");
    Ok(dir)
}
