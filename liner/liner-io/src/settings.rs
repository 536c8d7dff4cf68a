//! Run settings files (`key,value` rows).

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{open_error, IoError, IoResult};
use crate::format::{fields, parse_f64};

/// File name prefix of a settings file.
pub const SETTINGS_PREFIX: &str = "Settings_";

/// File name prefix of the job list paired with a settings file.
pub const JOB_LIST_PREFIX: &str = "Joblist_";

/// Values read from a settings file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Settings {
    /// Name of the run; output goes under a directory of this name.
    pub case_name: String,
    /// Job list path.
    pub job_file: PathBuf,
    /// Geometry file path.
    pub geometry_file: PathBuf,
    /// Approximate liner mesh spacing (mm).
    pub mesh_size: f64,
    /// Increments per contact sweep.
    pub contact_iterations: u32,
    /// Output folder for this liner; defaults to the geometry file stem.
    pub geometry_folder: Option<String>,
}

impl Settings {
    /// Output folder name for this liner.
    #[must_use]
    pub fn liner_folder(&self) -> String {
        self.geometry_folder.clone().unwrap_or_else(|| {
            self.geometry_file
                .file_stem()
                .map_or_else(String::new, |s| s.to_string_lossy().into_owned())
        })
    }
}

/// Read a settings file.
///
/// Unknown keys are ignored.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a required key is missing or
/// a numeric value does not parse.
pub fn read_settings<P: AsRef<Path>>(path: P) -> IoResult<Settings> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| open_error(path, e))?;
    parse_settings(&text)
}

/// Parse settings text.
///
/// # Errors
///
/// See [`read_settings`].
pub fn parse_settings(text: &str) -> IoResult<Settings> {
    let mut case_name = None;
    let mut job_file = None;
    let mut geometry_file = None;
    let mut mesh_size = None;
    let mut contact_iterations = None;
    let mut geometry_folder = None;

    for (i, line) in text.lines().enumerate() {
        let row = fields(line);
        let (Some(key), Some(value)) = (row.first(), row.get(1)) else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "CaseName" => case_name = Some(value.to_string()),
            "JobFile" => job_file = Some(PathBuf::from(value)),
            "CupGeomFile" => geometry_file = Some(PathBuf::from(value)),
            "ApproximateMeshSize" => mesh_size = Some(parse_f64(value, i + 1, "mesh size")?),
            "ContactIterations" => {
                contact_iterations = Some(value.parse::<u32>().map_err(|e| {
                    IoError::parse(i + 1, format!("contact iterations: {e} ({value:?})"))
                })?);
            }
            "CupGeomFolder" => geometry_folder = Some(value.to_string()),
            other => debug!(key = other, "Ignoring unknown setting"),
        }
    }

    Ok(Settings {
        case_name: case_name.ok_or(IoError::MissingSetting { key: "CaseName" })?,
        job_file: job_file.ok_or(IoError::MissingSetting { key: "JobFile" })?,
        geometry_file: geometry_file.ok_or(IoError::MissingSetting { key: "CupGeomFile" })?,
        mesh_size: mesh_size.ok_or(IoError::MissingSetting {
            key: "ApproximateMeshSize",
        })?,
        contact_iterations: contact_iterations.ok_or(IoError::MissingSetting {
            key: "ContactIterations",
        })?,
        geometry_folder,
    })
}

/// A settings file and the job list beside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualRun {
    /// `Settings_<name>.csv`.
    pub settings: PathBuf,
    /// `Joblist_<name>.csv`.
    pub job_list: PathBuf,
}

/// Find every `Settings_*` file in `dir` and pair it with its `Joblist_*`
/// file, sorted by file name.
///
/// # Errors
///
/// Returns an error if `dir` cannot be listed.
pub fn find_manual_runs<P: AsRef<Path>>(dir: P) -> IoResult<Vec<ManualRun>> {
    let dir = dir.as_ref();
    let mut runs: Vec<ManualRun> = fs::read_dir(dir)
        .map_err(|e| open_error(dir, e))?
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            let suffix = name.strip_prefix(SETTINGS_PREFIX)?;
            Some(ManualRun {
                settings: entry.path(),
                job_list: dir.join(format!("{JOB_LIST_PREFIX}{suffix}")),
            })
        })
        .collect();
    runs.sort_by(|a, b| a.settings.cmp(&b.settings));
    Ok(runs)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
CaseName,Trial_
JobFile,config/Joblist_Trial_.csv
CupGeomFile,geometry/Liner36.txt
ApproximateMeshSize,0.5
ContactIterations,100
Comment,ignored
";

    #[test]
    fn parses_known_keys() {
        let settings = parse_settings(SAMPLE).unwrap();
        assert_eq!(settings.case_name, "Trial_");
        assert_eq!(settings.mesh_size, 0.5);
        assert_eq!(settings.contact_iterations, 100);
        assert_eq!(settings.geometry_folder, None);
        assert_eq!(settings.liner_folder(), "Liner36");
    }

    #[test]
    fn explicit_folder_wins() {
        let text = format!("{SAMPLE}CupGeomFolder,Liner36_v2\n");
        assert_eq!(parse_settings(&text).unwrap().liner_folder(), "Liner36_v2");
    }

    #[test]
    fn missing_key_reported() {
        let text = SAMPLE.replace("ContactIterations,100\n", "");
        let err = parse_settings(&text).unwrap_err();
        assert!(matches!(
            err,
            IoError::MissingSetting {
                key: "ContactIterations"
            }
        ));
    }

    #[test]
    fn bad_iteration_count() {
        let text = SAMPLE.replace("ContactIterations,100", "ContactIterations,many");
        let err = parse_settings(&text).unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 5, .. }));
    }
}
