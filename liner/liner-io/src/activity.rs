//! Activity load profile files.

use std::fs;
use std::path::{Path, PathBuf};

use gait_profile::ActivityProfile;
use tracing::{info, warn};

use crate::error::{open_error, IoError, IoResult};
use crate::format::{fields, parse_f64};

/// Required first cell of an activity file.
pub const ACTIVITY_HEADER: &str = "Data formatted for PyEL Edge Loading Geometric Model";

/// Required column titles of an activity file.
pub const ACTIVITY_COLUMNS: [&str; 5] = [
    "Time (s)",
    "Axial Force (N)",
    "AA (degrees)",
    "FE (degrees)",
    "IE (degrees)",
];

/// Read an activity file. Rotation angles are converted to radians.
///
/// # Errors
///
/// [`IoError::BadHeader`] or [`IoError::BadColumns`] when the file does not
/// identify itself as an activity profile (both recoverable), and
/// [`IoError::Parse`] for a bad sample row.
pub fn read_activity<P: AsRef<Path>>(path: P) -> IoResult<ActivityProfile> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| open_error(path, e))?;
    let profile = parse_activity(&text, path)?;
    info!(
        path = %path.display(),
        samples = profile.len(),
        end_time = profile.end_time(),
        "Loaded activity profile"
    );
    Ok(profile)
}

/// Read an activity file, asking `correct` for another path once if the
/// first file has the wrong header or columns.
///
/// `correct` receives the rejected path and returns the replacement, or
/// `None` to give up.
///
/// # Errors
///
/// The first error if it is not recoverable or no replacement is offered,
/// otherwise whatever reading the replacement returns.
///
/// # Example
///
/// ```no_run
/// use liner_io::read_activity_with_retry;
/// use std::path::PathBuf;
///
/// let profile = read_activity_with_retry("walk.csv", |_| Some(PathBuf::from("walk_fixed.csv")));
/// ```
pub fn read_activity_with_retry<P, F>(path: P, correct: F) -> IoResult<ActivityProfile>
where
    P: AsRef<Path>,
    F: FnOnce(&Path) -> Option<PathBuf>,
{
    let path = path.as_ref();
    match read_activity(path) {
        Err(err) if err.is_recoverable() => {
            warn!(path = %path.display(), error = %err, "Activity file rejected, asking for another");
            match correct(path) {
                Some(replacement) => read_activity(replacement),
                None => Err(err),
            }
        }
        other => other,
    }
}

/// Parse activity text; `path` is only used in error messages.
///
/// # Errors
///
/// See [`read_activity`].
pub fn parse_activity(text: &str, path: &Path) -> IoResult<ActivityProfile> {
    let mut lines = text.lines();

    let header = fields(lines.next().unwrap_or_default());
    if header.first().map(String::as_str) != Some(ACTIVITY_HEADER) {
        return Err(IoError::BadHeader {
            path: path.to_path_buf(),
            expected: ACTIVITY_HEADER,
            found: header.first().cloned().unwrap_or_default(),
        });
    }

    let columns_line = lines.next().unwrap_or_default();
    if fields(columns_line) != ACTIVITY_COLUMNS {
        return Err(IoError::BadColumns {
            path: path.to_path_buf(),
            found: columns_line.to_string(),
        });
    }

    let mut time = Vec::new();
    let mut force = Vec::new();
    let mut angles: [Vec<f64>; 3] = Default::default();
    for (i, line) in lines.enumerate() {
        let number = i + 3;
        if line.trim().is_empty() {
            continue;
        }
        let row = fields(line);
        if row.len() < ACTIVITY_COLUMNS.len() {
            return Err(IoError::parse(
                number,
                format!("expected {} columns, found {}", ACTIVITY_COLUMNS.len(), row.len()),
            ));
        }
        time.push(parse_f64(&row[0], number, "time")?);
        force.push(parse_f64(&row[1], number, "axial force")?);
        for (channel, (value, name)) in angles
            .iter_mut()
            .zip(row[2..5].iter().zip(&ACTIVITY_COLUMNS[2..]))
        {
            channel.push(parse_f64(value, number, name)?.to_radians());
        }
    }

    let [abduction, flexion, rotation] = angles;
    let profile = ActivityProfile::new(time, force)?.with_rotations(abduction, flexion, rotation)?;
    Ok(profile)
}
