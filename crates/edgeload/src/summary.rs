//! Per-case summary rows and the run summary file.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use gait_profile::{ElTaxonomy, TimeMapping};
use liner_io::{float_repr, IoError};
use liner_orient::Rotation;
use nalgebra::Point3;
use serde::Serialize;
use tracing::info;

use crate::error::EdgeLoadResult;

/// Headline results of one case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseSummary {
    /// Result file name.
    pub file: String,
    /// Largest lateral mismatch among timed records (mm).
    pub max_lateral_separation: f64,
    /// Contact position at that separation, in the inclined frame.
    pub contact_with_inclination: Point3<f64>,
    /// The same position rotated back to zero inclination.
    pub contact_at_zero_inclination: Point3<f64>,
    /// True when any record lies in an edge-loading region.
    pub edge_loading: bool,
    /// Largest axial force among edge-loading records (N).
    pub peak_edge_axial_force: Option<f64>,
    /// Edge-loading classification.
    pub taxonomy: ElTaxonomy,
}

impl CaseSummary {
    /// Summarise a case's timed records. `None` when there are none.
    #[must_use]
    pub fn from_mapping(file: &str, inclination: f64, mapping: &TimeMapping) -> Option<Self> {
        let first = mapping.records.first()?;
        // First record wins ties.
        let widest = mapping.records.iter().fold(first, |best, r| {
            if r.contact().lateral_mismatch > best.contact().lateral_mismatch {
                r
            } else {
                best
            }
        });
        let position = widest.contact().position;
        let upright = Rotation::about_ap((-inclination).to_radians()).transform_point(&position);

        let peak_edge_axial_force = mapping
            .records
            .iter()
            .filter(|r| r.contact().is_edge_loading())
            .map(|r| r.force.axial_force)
            .reduce(f64::max);

        Some(Self {
            file: file.to_string(),
            max_lateral_separation: widest.contact().lateral_mismatch,
            contact_with_inclination: position,
            contact_at_zero_inclination: upright,
            edge_loading: peak_edge_axial_force.is_some(),
            peak_edge_axial_force,
            taxonomy: mapping.taxonomy,
        })
    }
}

/// Header row of the run summary file.
pub const SUMMARY_COLUMNS: [&str; 7] = [
    "File",
    "Max Lateral Separation",
    "Contact Points with Inc",
    "Rotated Contact Points 0\u{b0}",
    "Edge Loading?",
    "Peak Axial Force",
    "EL Type",
];

fn tuple(p: &Point3<f64>) -> String {
    format!("\"({}, {}, {})\"", float_repr(p.x), float_repr(p.y), float_repr(p.z))
}

/// Write summaries as a comma-separated table.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_summary_csv<W: Write>(mut writer: W, summaries: &[CaseSummary]) -> EdgeLoadResult<()> {
    let io = |e: std::io::Error| IoError::from(e);
    writeln!(writer, "{}", SUMMARY_COLUMNS.join(",")).map_err(io)?;
    for s in summaries {
        writeln!(
            writer,
            "{},{},{},{},{},{},\"{}\"",
            s.file,
            float_repr(s.max_lateral_separation),
            tuple(&s.contact_with_inclination),
            tuple(&s.contact_at_zero_inclination),
            if s.edge_loading { "Yes" } else { "No" },
            s.peak_edge_axial_force.map_or_else(|| "N/A".to_string(), float_repr),
            s.taxonomy,
        )
        .map_err(io)?;
    }
    writer.flush().map_err(io)?;
    Ok(())
}

/// Write `Analysis Summary <case_name>.csv` (and `.json` when `json` is set)
/// into `case_dir`, returning the paths written.
///
/// # Errors
///
/// Returns an error if a file cannot be created or written.
pub fn save_summary(
    case_dir: &Path,
    case_name: &str,
    summaries: &[CaseSummary],
    json: bool,
) -> EdgeLoadResult<Vec<PathBuf>> {
    fs::create_dir_all(case_dir).map_err(IoError::from)?;
    let stem = format!("Analysis Summary {case_name}");

    let csv_path = case_dir.join(format!("{stem}.csv"));
    let file = File::create(&csv_path).map_err(IoError::from)?;
    write_summary_csv(BufWriter::new(file), summaries)?;
    let mut written = vec![csv_path];

    if json {
        let json_path = case_dir.join(format!("{stem}.json"));
        let file = File::create(&json_path).map_err(IoError::from)?;
        serde_json::to_writer_pretty(BufWriter::new(file), summaries)?;
        written.push(json_path);
    }

    info!(cases = summaries.len(), dir = %case_dir.display(), "Wrote run summary");
    Ok(written)
}
