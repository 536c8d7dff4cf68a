//! Per-case result files.
//!
//! A result file has one metadata line followed by a comma-separated table
//! with one row per timed contact record.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use hashbrown::HashMap;
use liner_types::{PointId, TimedRecord};
use tracing::info;

use crate::error::IoResult;
use crate::format::{float_repr, quote};

/// Subdirectory of a case directory that holds result files.
pub const RAW_DATA_DIR: &str = "Raw Data";

/// Column titles of the result table.
pub const OUTPUT_COLUMNS: [&str; 16] = [
    "Contact Point ID",
    "Old Point ID",
    "point_count",
    "Nx",
    "Ny",
    "Nz",
    "SNx",
    "SNy",
    "SNz",
    "Anterior Mismatch",
    "Lateral Mismatch",
    "Location",
    "Edge?",
    "Axial Force (N)",
    "ResultantForce",
    "Time (s)",
];

/// Inputs echoed on the first line of a result file. Angles in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseMetadata {
    /// Geometry file the liner came from.
    pub geometry_file: PathBuf,
    /// Head radius (mm).
    pub head_radius: f64,
    /// Cup inclination.
    pub inclination: f64,
    /// Cup version.
    pub version: f64,
    /// Cup tilt.
    pub tilt: f64,
    /// Lip angle.
    pub lip: f64,
    /// Maximum anterior mismatch (mm).
    pub anterior_mismatch: f64,
    /// Anterior stiffness (N/mm).
    pub anterior_stiffness: f64,
    /// Maximum lateral mismatch (mm).
    pub lateral_mismatch: f64,
    /// Lateral stiffness (N/mm).
    pub lateral_stiffness: f64,
    /// Liner mesh spacing (mm).
    pub mesh_size: f64,
    /// Wall time spent on the case.
    pub runtime: Duration,
    /// Activity file the times came from.
    pub activity_file: PathBuf,
}

impl fmt::Display for CaseMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Axisym Geom, PointCloud = {}, HeadRad = {}, I/V/T = {}/{}/{}, Lip Angle = {}, \
             AM/AMK/LM/LMK = {}/{}/{}/{}, CupMeshSize = {}, runtime = {}s, ActivityFile = {}",
            self.geometry_file.display(),
            float_repr(self.head_radius),
            float_repr(self.inclination),
            float_repr(self.version),
            float_repr(self.tilt),
            float_repr(self.lip),
            float_repr(self.anterior_mismatch),
            float_repr(self.anterior_stiffness),
            float_repr(self.lateral_mismatch),
            float_repr(self.lateral_stiffness),
            float_repr(self.mesh_size),
            float_repr(self.runtime.as_secs_f64()),
            self.activity_file.display(),
        )
    }
}

/// `<output>/<case_name>/Raw Data/<case_index>_<case_name>_Results.txt`.
#[must_use]
pub fn results_path(output: &Path, case_name: &str, case_index: usize) -> PathBuf {
    output
        .join(case_name)
        .join(RAW_DATA_DIR)
        .join(format!("{case_index}_{case_name}_Results.txt"))
}

/// Number of records per source point id.
#[must_use]
pub fn point_counts(records: &[TimedRecord]) -> HashMap<PointId, usize> {
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(record.contact().source).or_insert(0) += 1;
    }
    counts
}

/// Write a result table to `writer`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_case_output<W: Write>(
    mut writer: W,
    metadata: &CaseMetadata,
    records: &[TimedRecord],
) -> IoResult<()> {
    writeln!(writer, "{metadata}")?;
    writeln!(writer, "{}", OUTPUT_COLUMNS.join(","))?;

    let counts = point_counts(records);
    for record in records {
        let contact = record.contact();
        let p = contact.position;
        let n = contact.normal;
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            record.id,
            contact.source,
            counts.get(&contact.source).copied().unwrap_or(0),
            float_repr(p.x),
            float_repr(p.y),
            float_repr(p.z),
            float_repr(n.x),
            float_repr(n.y),
            float_repr(n.z),
            float_repr(contact.anterior_mismatch),
            float_repr(contact.lateral_mismatch),
            quote(&contact.regions.to_string()),
            if contact.edge { "Y" } else { "N" },
            float_repr(record.force.axial_force),
            float_repr(record.force.resultant_force),
            float_repr(record.time),
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a case's result file under `output`, creating directories as
/// needed, and return its path.
///
/// # Errors
///
/// Returns an error if a directory or the file cannot be created or written.
pub fn save_case_output(
    output: &Path,
    case_name: &str,
    case_index: usize,
    metadata: &CaseMetadata,
    records: &[TimedRecord],
) -> IoResult<PathBuf> {
    let path = results_path(output, case_name, case_index);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = File::create(&path)?;
    write_case_output(BufWriter::new(file), metadata, records)?;
    info!(path = %path.display(), rows = records.len(), "Wrote case results");
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use liner_types::{ContactRecord, ForceRecord, RegionLabels, SurfacePoint};
    use nalgebra::{Point3, Vector3};

    fn metadata() -> CaseMetadata {
        CaseMetadata {
            geometry_file: PathBuf::from("Liner36.txt"),
            head_radius: 14.0,
            inclination: 45.0,
            version: 0.0,
            tilt: 0.0,
            lip: 0.0,
            anterior_mismatch: 0.0,
            anterior_stiffness: 0.0,
            lateral_mismatch: 4.0,
            lateral_stiffness: 100.0,
            mesh_size: 0.5,
            runtime: Duration::from_millis(1500),
            activity_file: PathBuf::from("walk.csv"),
        }
    }

    fn timed(id: u32, source: u32, label: RegionLabels, time: f64) -> TimedRecord {
        let p = SurfacePoint::new(
            PointId::new(source),
            Point3::new(0.0, -1.5, 2.0),
            Vector3::new(0.0, 1.0, 0.0),
        )
        .with_regions(label)
        .with_edge(true);
        TimedRecord {
            id,
            force: ForceRecord {
                contact: ContactRecord::capture(id, &p, 0.0, 2.0),
                axial_force: 200.0,
                resultant_force: 282.842_712_474_619,
            },
            time,
            synthetic: false,
        }
    }

    #[test]
    fn metadata_line_format() {
        assert_eq!(
            metadata().to_string(),
            "Axisym Geom, PointCloud = Liner36.txt, HeadRad = 14.0, I/V/T = 45.0/0.0/0.0, \
             Lip Angle = 0.0, AM/AMK/LM/LMK = 0.0/0.0/4.0/100.0, CupMeshSize = 0.5, \
             runtime = 1.5s, ActivityFile = walk.csv"
        );
    }

    #[test]
    fn table_rows_quote_locations_and_count_points() {
        let records = vec![
            timed(1, 40, RegionLabels::pair("EL_1", "Bearing"), 0.0),
            timed(1, 40, RegionLabels::pair("EL_1", "Bearing"), 0.05),
            timed(2, 41, RegionLabels::single("Bearing"), 0.1),
        ];
        let mut buf = Vec::new();
        write_case_output(&mut buf, &metadata(), &records).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], OUTPUT_COLUMNS.join(","));
        assert_eq!(
            lines[2],
            "1,40,2,0.0,-1.5,2.0,0.0,1.0,0.0,0.0,2.0,\"['EL_1', 'Bearing']\",Y,200.0,282.842712474619,0.0"
        );
        assert!(lines[4].starts_with("2,41,1,"));
        assert!(lines[4].contains(",\"['Bearing', 'NA']\",Y,"));
    }

    #[test]
    fn results_path_layout() {
        let path = results_path(Path::new("out"), "Trial_", 3);
        assert_eq!(
            path,
            Path::new("out").join("Trial_").join("Raw Data").join("3_Trial__Results.txt")
        );
    }
}
