//! Job list files: one row per analysis case.
//!
//! ```text
//! case_num,inc_ang,ver_ang,tilt_ang,head_rad,lat_mm,ant_mm,lat_spr,ant_spr,load_file,lip_ang
//! 1,45,0,0,d,4,0,100,0,walk.csv,0
//! ```
//!
//! A head radius of `d` or `D` takes the radius from the geometry header.
//! A `load_file` naming a directory expands into one case per file in it.

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{open_error, IoError, IoResult};
use crate::format::{fields, parse_f64};

/// Required first cell of a job list.
pub const JOB_LIST_HEADER: &str = "case_num";

const JOB_COLUMNS: usize = 11;

/// Head radius requested by a job.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HeadRadius {
    /// Use the radius declared in the geometry file header.
    #[default]
    FromGeometry,
    /// Explicit radius (mm).
    Millimetres(f64),
}

impl HeadRadius {
    /// Resolve against the geometry header radius.
    #[must_use]
    pub fn resolve(self, geometry_default: Option<f64>) -> Option<f64> {
        match self {
            Self::FromGeometry => geometry_default,
            Self::Millimetres(r) => Some(r),
        }
    }
}

/// One case from a job list. Angles are in degrees.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JobCase {
    /// Case label from the first column.
    pub case_num: String,
    /// Cup inclination.
    pub inclination: f64,
    /// Cup anteversion.
    pub anteversion: f64,
    /// Operative version (tilt).
    pub operative_version: f64,
    /// Head radius.
    pub head_radius: HeadRadius,
    /// Maximum lateral mismatch (mm).
    pub lateral_mismatch: f64,
    /// Maximum anterior mismatch (mm).
    pub anterior_mismatch: f64,
    /// Lateral spring stiffness (N/mm).
    pub lateral_stiffness: f64,
    /// Anterior spring stiffness (N/mm).
    pub anterior_stiffness: f64,
    /// Activity profile file.
    pub activity_file: PathBuf,
    /// Lip angle.
    pub lip_angle: f64,
}

/// Read a job list, expanding activity directories and zeroing the values
/// this release does not model (see [`enforce_lateral_only`]).
///
/// # Errors
///
/// Returns an error if the file cannot be read, the header cell is not
/// [`JOB_LIST_HEADER`], a row is malformed, or an activity directory cannot
/// be listed.
pub fn read_job_list<P: AsRef<Path>>(path: P) -> IoResult<Vec<JobCase>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| open_error(path, e))?;
    let mut cases = Vec::new();
    for case in parse_job_list(&text, path)? {
        expand_activity_dir(case, &mut cases)?;
    }
    enforce_lateral_only(&mut cases);
    info!(path = %path.display(), cases = cases.len(), "Loaded job list");
    Ok(cases)
}

/// Parse job list text without touching the filesystem.
///
/// # Errors
///
/// See [`read_job_list`].
pub fn parse_job_list(text: &str, path: &Path) -> IoResult<Vec<JobCase>> {
    let mut lines = text.lines();
    let header = fields(lines.next().unwrap_or_default());
    let first = header.first().map(|h| h.trim_start_matches('\u{feff}'));
    if first != Some(JOB_LIST_HEADER) {
        return Err(IoError::BadHeader {
            path: path.to_path_buf(),
            expected: JOB_LIST_HEADER,
            found: first.unwrap_or_default().to_string(),
        });
    }

    let mut cases = Vec::new();
    for (i, line) in lines.enumerate() {
        let row = fields(line);
        if row.first().map_or(true, |c| c.trim().is_empty()) {
            continue;
        }
        cases.push(parse_row(&row, i + 2)?);
    }
    Ok(cases)
}

fn parse_row(row: &[String], line: usize) -> IoResult<JobCase> {
    if row.len() < JOB_COLUMNS {
        return Err(IoError::parse(
            line,
            format!("expected {JOB_COLUMNS} columns, found {}", row.len()),
        ));
    }
    let radius = row[4].trim();
    let head_radius = if radius.starts_with(['d', 'D']) {
        HeadRadius::FromGeometry
    } else {
        HeadRadius::Millimetres(parse_f64(radius, line, "head radius")?)
    };
    Ok(JobCase {
        case_num: row[0].trim().to_string(),
        inclination: parse_f64(&row[1], line, "inclination")?,
        anteversion: parse_f64(&row[2], line, "anteversion")?,
        operative_version: parse_f64(&row[3], line, "operative version")?,
        head_radius,
        lateral_mismatch: parse_f64(&row[5], line, "lateral mismatch")?,
        anterior_mismatch: parse_f64(&row[6], line, "anterior mismatch")?,
        lateral_stiffness: parse_f64(&row[7], line, "lateral stiffness")?,
        anterior_stiffness: parse_f64(&row[8], line, "anterior stiffness")?,
        activity_file: PathBuf::from(row[9].trim()),
        lip_angle: parse_f64(&row[10], line, "lip angle")?,
    })
}

fn expand_activity_dir(case: JobCase, out: &mut Vec<JobCase>) -> IoResult<()> {
    if !case.activity_file.is_dir() {
        out.push(case);
        return Ok(());
    }
    let mut files: Vec<PathBuf> = fs::read_dir(&case.activity_file)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    out.extend(files.into_iter().map(|activity_file| JobCase {
        activity_file,
        ..case.clone()
    }));
    Ok(())
}

/// Zero anteversion, operative version, anterior mismatch and lip angle,
/// warning once per quantity that had a non-zero value.
pub fn enforce_lateral_only(cases: &mut [JobCase]) {
    let mut zero = |name: &str, get: fn(&mut JobCase) -> &mut f64| {
        let mut found = false;
        for case in cases.iter_mut() {
            let value = get(case);
            if *value != 0.0 {
                found = true;
                *value = 0.0;
            }
        }
        if found {
            warn!("Non-zero {name} values recorded; they are not used in lateral-only runs");
        }
    };
    zero("anteversion", |c| &mut c.anteversion);
    zero("operative version", |c| &mut c.operative_version);
    zero("anterior mismatch", |c| &mut c.anterior_mismatch);
    zero("lip angle", |c| &mut c.lip_angle);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
case_num,inc_ang,ver_ang,tilt_ang,head_rad,lat_mm,ant_mm,lat_spr,ant_spr,load_file,lip_ang
1,45,0,0,d,4,0,100,0,walk.csv,0
2,55,10,0,14,2.5,1,50,10,stairs.csv,5
,,,,,,,,,,
";

    #[test]
    fn parses_rows_and_skips_blank_cases() {
        let cases = parse_job_list(SAMPLE, Path::new("Joblist_a.csv")).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].head_radius, HeadRadius::FromGeometry);
        assert_eq!(cases[1].head_radius, HeadRadius::Millimetres(14.0));
        assert_eq!(cases[1].lateral_mismatch, 2.5);
        assert_eq!(cases[1].activity_file, PathBuf::from("stairs.csv"));
    }

    #[test]
    fn lateral_only_zeroes_unused_values() {
        let mut cases = parse_job_list(SAMPLE, Path::new("Joblist_a.csv")).unwrap();
        enforce_lateral_only(&mut cases);
        let c = &cases[1];
        assert_eq!(
            (c.anteversion, c.anterior_mismatch, c.lip_angle),
            (0.0, 0.0, 0.0)
        );
        // Lateral values are untouched.
        assert_eq!(c.inclination, 55.0);
        assert_eq!(c.anterior_stiffness, 10.0);
    }

    #[test]
    fn header_cell_checked() {
        let err = parse_job_list("case,inc\n", Path::new("j.csv")).unwrap_err();
        assert!(matches!(err, IoError::BadHeader { .. }));
    }

    #[test]
    fn short_row_rejected() {
        let err = parse_job_list("case_num\n1,45,0\n", Path::new("j.csv")).unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 2, .. }));
    }

    #[test]
    fn default_radius_resolves_from_geometry() {
        assert_eq!(HeadRadius::FromGeometry.resolve(Some(16.0)), Some(16.0));
        assert_eq!(HeadRadius::Millimetres(14.0).resolve(Some(16.0)), Some(14.0));
        assert_eq!(HeadRadius::FromGeometry.resolve(None), None);
    }
}
