//! Filesystem behaviour of the readers and the case writer.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use liner_io::{
    find_manual_runs, read_activity_with_retry, read_geometry, read_job_list, save_case_output,
    CaseMetadata, IoError, ACTIVITY_COLUMNS, ACTIVITY_HEADER,
};

fn activity_text() -> String {
    format!(
        "{ACTIVITY_HEADER}\n{}\n0.0,100,0,0,0\n0.5,900,0,0,0\n1.0,100,0,0,0\n",
        ACTIVITY_COLUMNS.join(",")
    )
}

fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn activity_retry_uses_corrected_path() {
    let dir = tempfile::tempdir().unwrap();
    let bad = write(dir.path(), "bad.csv", "not an activity\n");
    let good = write(dir.path(), "good.csv", &activity_text());

    let asked = Cell::new(false);
    let profile = read_activity_with_retry(&bad, |rejected| {
        asked.set(true);
        assert_eq!(rejected, bad.as_path());
        Some(good.clone())
    })
    .unwrap();
    assert!(asked.get());
    assert_eq!(profile.len(), 3);
}

#[test]
fn activity_retry_fails_on_second_bad_file() {
    let dir = tempfile::tempdir().unwrap();
    let bad = write(dir.path(), "bad.csv", "not an activity\n");
    let also_bad = write(dir.path(), "also_bad.csv", "still not\n");

    let err = read_activity_with_retry(&bad, |_| Some(also_bad.clone())).unwrap_err();
    assert!(matches!(err, IoError::BadHeader { path, .. } if path == also_bad));
}

#[test]
fn activity_retry_not_offered_for_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.csv");
    let err = read_activity_with_retry(&missing, |_| panic!("should not ask")).unwrap_err();
    assert!(matches!(err, IoError::FileNotFound { .. }));
}

#[test]
fn job_list_expands_activity_directory() {
    let dir = tempfile::tempdir().unwrap();
    let activities = dir.path().join("activities");
    fs::create_dir(&activities).unwrap();
    write(&activities, "b_stairs.csv", &activity_text());
    write(&activities, "a_walk.csv", &activity_text());

    let job_list = format!(
        "case_num,inc,ver,tilt,rad,lat,ant,lat_k,ant_k,load,lip\n\
         1,45,5,0,D,4,0,100,0,{},0\n",
        activities.display()
    );
    let path = write(dir.path(), "Joblist_x.csv", &job_list);

    let cases = read_job_list(&path).unwrap();
    assert_eq!(cases.len(), 2);
    assert!(cases[0].activity_file.ends_with("a_walk.csv"));
    assert!(cases[1].activity_file.ends_with("b_stairs.csv"));
    assert!(cases.iter().all(|c| c.anteversion == 0.0 && c.inclination == 45.0));
}

#[test]
fn geometry_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "liner.txt",
        "Liner, HeadRad = 16\n(7, 0.0, 0.0, 20.0, 0.0, 0.0, 1.0, ['EL_1'], 'Y', [])\n",
    );
    let geometry = read_geometry(&path).unwrap();
    assert_eq!(geometry.default_head_radius, Some(16.0));
    assert_eq!(geometry.cloud.edge_ids().count(), 1);
}

#[test]
fn case_output_lands_in_raw_data() {
    let dir = tempfile::tempdir().unwrap();
    let metadata = CaseMetadata {
        geometry_file: PathBuf::from("liner.txt"),
        head_radius: 16.0,
        inclination: 50.0,
        version: 0.0,
        tilt: 0.0,
        lip: 0.0,
        anterior_mismatch: 0.0,
        anterior_stiffness: 0.0,
        lateral_mismatch: 3.0,
        lateral_stiffness: 50.0,
        mesh_size: 0.5,
        runtime: Duration::from_secs(2),
        activity_file: PathBuf::from("walk.csv"),
    };
    let path = save_case_output(dir.path(), "Trial_", 1, &metadata, &[]).unwrap();

    assert_eq!(
        path,
        dir.path().join("Trial_").join("Raw Data").join("1_Trial__Results.txt")
    );
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Axisym Geom, PointCloud = liner.txt, HeadRad = 16.0,"));
    assert!(text.contains("runtime = 2.0s"));
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn manual_runs_pair_settings_with_job_lists() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Settings_B.csv", "");
    write(dir.path(), "Settings_A.csv", "");
    write(dir.path(), "Joblist_A.csv", "");
    write(dir.path(), "notes.txt", "");

    let runs = find_manual_runs(dir.path()).unwrap();
    assert_eq!(runs.len(), 2);
    assert!(runs[0].settings.ends_with("Settings_A.csv"));
    assert_eq!(runs[0].job_list, dir.path().join("Joblist_A.csv"));
    assert_eq!(runs[1].job_list, dir.path().join("Joblist_B.csv"));
}
