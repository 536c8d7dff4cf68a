//! Assigning gait-cycle times to contact forces.
//!
//! Phases are visited in a fixed priority order: first rise, mid fall,
//! second rise, final fall. Within a phase, records are taken in the order
//! the load moves through it: ascending force on a rise, descending on a
//! fall. A force matching the last one placed in the previous phase is
//! skipped, since it is the shared turning sample.

use std::fmt;

use liner_types::{ForceRecord, TimedRecord};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GaitResult;
use crate::segment::{GaitSegments, Phase};

/// Number of trailing records added after the last mapped time.
pub const TRAILING_RECORDS: u32 = 10;

/// When during the cycle edge loading happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ElPhase {
    /// No contact carries an edge-loading label.
    #[default]
    None,
    /// Edge loading only in the rise to the first peak or the final fall.
    Swing,
    /// Edge loading between the two peaks.
    Stance,
}

impl fmt::Display for ElPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "No EL",
            Self::Swing => "EL During Swing Phase",
            Self::Stance => "EL During Stance Phase",
        })
    }
}

/// Edge-loading classification of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElTaxonomy {
    /// Phase in which edge loading occurs.
    pub phase: ElPhase,
    /// True when every timed contact is edge loading.
    pub constant: bool,
}

impl ElTaxonomy {
    /// Label for the constancy half of the classification.
    #[must_use]
    pub const fn constancy_label(&self) -> &'static str {
        if self.constant {
            "Constant EL"
        } else {
            "Not constant EL"
        }
    }
}

impl fmt::Display for ElTaxonomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.phase, self.constancy_label())
    }
}

/// Timed records for one case.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeMapping {
    /// Records in emission order, trailing synthetic records last.
    pub records: Vec<TimedRecord>,
    /// Edge-loading classification.
    pub taxonomy: ElTaxonomy,
    /// Force records that fell in no phase window.
    pub unmapped: usize,
}

impl TimeMapping {
    /// Records that came from a contact increment.
    pub fn measured(&self) -> impl Iterator<Item = &TimedRecord> {
        self.records.iter().filter(|r| !r.synthetic)
    }

    /// Latest assigned time.
    #[must_use]
    pub fn max_time(&self) -> Option<f64> {
        self.records.iter().map(|r| r.time).reduce(f64::max)
    }
}

/// Phase window test on an axial force.
fn in_window(phase: Phase, force: f64, segments: &GaitSegments) -> bool {
    let l = &segments.levels;
    match phase {
        Phase::FirstRise => force >= l.initial && force <= l.first_peak,
        Phase::MidFall => force >= l.trough && force < l.first_peak,
        Phase::SecondRise => force > l.trough && force <= l.second_peak,
        Phase::FinalFall => force >= l.terminal && force < l.second_peak,
    }
}

/// Record indices sorted by axial force, ascending for a rising phase and
/// descending otherwise. Equal forces keep increment order.
fn load_order(forces: &[ForceRecord], rising: bool) -> Vec<usize> {
    let mut order: Vec<usize> = (0..forces.len()).collect();
    order.sort_by(|&a, &b| {
        let by_force = forces[a].axial_force.total_cmp(&forces[b].axial_force);
        if rising {
            by_force
        } else {
            by_force.reverse()
        }
    });
    order
}

fn timed(force: &ForceRecord, time: f64) -> TimedRecord {
    TimedRecord {
        id: force.contact.sequence,
        force: force.clone(),
        time,
        synthetic: false,
    }
}

/// Place every force record on the gait-cycle time axis.
///
/// If the latest mapped time is before `activity_end`, [`TRAILING_RECORDS`]
/// copies of the record at that time are appended at even steps up to
/// `activity_end`. Their ids continue two past the highest increment.
///
/// # Errors
///
/// Returns [`crate::GaitError::Interpolation`] if a segment interpolant
/// rejects a force inside its window.
pub fn map_times(
    forces: &[ForceRecord],
    segments: &GaitSegments,
    activity_end: f64,
) -> GaitResult<TimeMapping> {
    let mut records: Vec<TimedRecord> = Vec::with_capacity(forces.len() * 2 + 11);
    let mut mapped = vec![false; forces.len()];
    let mut swing = false;
    let mut stance = false;
    let mut previous: Option<f64> = None;

    for phase in Phase::ALL {
        let segment = segments.segment(phase);
        let order = load_order(forces, phase.is_rising());

        let mut last: Option<f64> = None;
        for i in order {
            let record = &forces[i];
            let axial = record.axial_force;
            if !in_window(phase, axial, segments) {
                continue;
            }
            if phase != Phase::FirstRise && previous == Some(axial) {
                continue;
            }
            if phase == Phase::FirstRise && records.is_empty() {
                // In contact from heel strike.
                records.push(timed(record, 0.0));
            }
            records.push(timed(record, segment.time_at(axial)?));
            mapped[i] = true;
            last = Some(axial);

            if record.contact.is_edge_loading() {
                if phase.is_stance() {
                    stance = true;
                } else {
                    swing = true;
                }
            }
        }
        previous = last;
    }

    let phase = if stance {
        ElPhase::Stance
    } else if swing {
        ElPhase::Swing
    } else {
        ElPhase::None
    };
    let constant = !records.is_empty() && records.iter().all(|r| r.contact().is_edge_loading());

    let mut mapping = TimeMapping {
        records,
        taxonomy: ElTaxonomy { phase, constant },
        unmapped: mapped.iter().filter(|m| !**m).count(),
    };
    append_trailing(&mut mapping, forces, activity_end);

    debug!(
        records = mapping.records.len(),
        unmapped = mapping.unmapped,
        taxonomy = %mapping.taxonomy,
        "Mapped contact forces to gait times"
    );
    Ok(mapping)
}

fn append_trailing(mapping: &mut TimeMapping, forces: &[ForceRecord], activity_end: f64) {
    // Latest time wins; among equal times, the later record.
    let Some(latest) = mapping
        .records
        .iter()
        .reduce(|best, r| if r.time >= best.time { r } else { best })
        .cloned()
    else {
        return;
    };
    let max_time = latest.time;
    if max_time >= activity_end {
        return;
    }
    let step = (activity_end - max_time) / f64::from(TRAILING_RECORDS);
    let next_id = forces.iter().map(|f| f.contact.sequence).max().unwrap_or(0) + 2;
    for i in 0..TRAILING_RECORDS {
        mapping.records.push(TimedRecord {
            id: next_id + i,
            force: latest.force.clone(),
            time: max_time + step * f64::from(i + 1),
            synthetic: true,
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::activity::ActivityProfile;
    use crate::segment::segment_profile;
    use liner_types::{ContactRecord, PointId, RegionLabels, SurfacePoint};
    use nalgebra::{Point3, Vector3};

    fn segments() -> GaitSegments {
        // Peaks 1000 N and 900 N, trough 500 N, ends at 100 N by t = 1.0.
        let time = vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0];
        let force = vec![100.0, 1000.0, 500.0, 900.0, 300.0, 100.0];
        segment_profile(&ActivityProfile::new(time, force).unwrap()).unwrap()
    }

    fn force(seq: u32, axial: f64, label: &str) -> ForceRecord {
        let p = SurfacePoint::new(PointId::new(seq * 10), Point3::origin(), Vector3::y())
            .with_regions(RegionLabels::single(label));
        ForceRecord {
            contact: ContactRecord::capture(seq, &p, 0.0, 0.0),
            axial_force: axial,
            resultant_force: axial,
        }
    }

    #[test]
    fn first_rise_record_is_also_emitted_at_zero() {
        let forces = vec![force(1, 550.0, "Bearing")];
        let mapping = map_times(&forces, &segments(), 1.0).unwrap();
        assert_eq!(mapping.records[0].time, 0.0);
        assert_eq!(mapping.records[0].id, 1);
        assert!((mapping.records[1].time - 0.1).abs() < 1e-12);
    }

    #[test]
    fn skip_only_looks_at_the_preceding_phase() {
        // 700 N sits in all four windows.
        let forces = vec![force(1, 700.0, "Bearing")];
        let mapping = map_times(&forces, &segments(), 1.0).unwrap();
        let measured: Vec<f64> = mapping.measured().map(|r| r.time).collect();
        // Phase 2 skips it after phase 1, phase 3 places it again since
        // phase 2 placed nothing, phase 4 skips it after phase 3.
        assert_eq!(measured.len(), 3);
        assert_eq!(measured[0], 0.0);
        assert!((measured[1] - 0.4 / 3.0).abs() < 1e-12);
        assert!((measured[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn distinct_forces_cover_all_phases() {
        let forces = vec![
            force(1, 950.0, "Bearing"),
            force(2, 800.0, "Bearing"),
            force(3, 600.0, "Bearing"),
            force(4, 200.0, "Bearing"),
        ];
        let mapping = map_times(&forces, &segments(), 1.0).unwrap();
        assert_eq!(mapping.unmapped, 0);
        // Phase 1 takes 200, 600, 800 and 950, plus the t=0 copy of 200.
        let phase_one = mapping.measured().take_while(|r| r.time < 0.2 + 1e-12).count();
        assert_eq!(phase_one, 5);
    }

    #[test]
    fn trailing_records_reach_activity_end() {
        let forces = vec![force(1, 200.0, "Bearing"), force(2, 150.0, "Bearing")];
        let mapping = map_times(&forces, &segments(), 1.0).unwrap();

        let synthetic: Vec<&TimedRecord> = mapping.records.iter().filter(|r| r.synthetic).collect();
        assert_eq!(synthetic.len(), 10);
        assert_eq!(synthetic[0].id, 4);
        assert_eq!(synthetic[9].id, 13);
        assert!((synthetic[9].time - 1.0).abs() < 1e-12);
        let last_measured = mapping.measured().last().unwrap();
        assert_eq!(synthetic[0].force, last_measured.force);
    }

    /// Forces in sweep order: the remaining mismatch shrinks, so they fall.
    fn sweep_forces(axial: &[f64]) -> Vec<ForceRecord> {
        (1..)
            .zip(axial)
            .map(|(seq, &a)| force(seq, a, "Bearing"))
            .collect()
    }

    #[test]
    fn heel_strike_takes_the_lightest_contact() {
        let forces = sweep_forces(&[950.0, 800.0, 600.0, 200.0, 150.0]);
        let mapping = map_times(&forces, &segments(), 1.0).unwrap();

        assert_eq!(mapping.records[0].time, 0.0);
        assert_eq!(mapping.records[0].force.axial_force, 150.0);
        assert_eq!(mapping.records[0].contact().source, PointId::new(50));
        // First rise climbs through the loads in ascending order.
        let rise: Vec<f64> = mapping.records[1..6].iter().map(|r| r.force.axial_force).collect();
        assert_eq!(rise, vec![150.0, 200.0, 600.0, 800.0, 950.0]);
    }

    #[test]
    fn trailing_records_rest_at_the_latest_contact() {
        let forces = sweep_forces(&[950.0, 800.0, 600.0, 200.0, 150.0]);
        let mapping = map_times(&forces, &segments(), 1.0).unwrap();

        let latest = mapping
            .measured()
            .reduce(|best, r| if r.time >= best.time { r } else { best })
            .unwrap();
        assert_eq!(latest.force.axial_force, 150.0);

        let synthetic: Vec<&TimedRecord> = mapping.records.iter().filter(|r| r.synthetic).collect();
        assert_eq!(synthetic.len(), 10);
        assert_eq!(synthetic[0].id, 7);
        assert!(synthetic.iter().all(|r| r.contact().source == latest.contact().source));
        assert!(synthetic.iter().all(|r| r.time > latest.time));
    }

    #[test]
    fn turning_sample_is_skipped_after_the_peak() {
        let forces = sweep_forces(&[990.0, 700.0]);
        let mapping = map_times(&forces, &segments(), 1.0).unwrap();

        // 990 N is the last load placed on the first rise, so the mid fall
        // starts below it.
        let at_990 = mapping.measured().filter(|r| r.force.axial_force == 990.0).count();
        assert_eq!(at_990, 1);
        assert!(mapping
            .measured()
            .any(|r| r.force.axial_force == 700.0 && r.time > 0.2 && r.time < 0.4));
    }

    #[test]
    fn no_trailing_records_when_cycle_is_covered() {
        let forces = vec![force(1, 100.0, "Bearing")];
        let mapping = map_times(&forces, &segments(), 0.0).unwrap();
        assert!(mapping.records.iter().all(|r| !r.synthetic));
    }

    #[test]
    fn stance_edge_loading_overrides_swing() {
        let forces = vec![force(1, 950.0, "EL_1"), force(2, 600.0, "EL_2")];
        let mapping = map_times(&forces, &segments(), 1.0).unwrap();
        assert_eq!(mapping.taxonomy.phase, ElPhase::Stance);
        assert!(mapping.taxonomy.constant);
        assert_eq!(mapping.taxonomy.to_string(), "EL During Stance Phase, Constant EL");
    }

    #[test]
    fn swing_only_edge_loading() {
        // 1000 N is only in the first-rise window (the peak itself).
        let forces = vec![force(1, 1000.0, "EL_1"), force(2, 100.0, "Bearing")];
        let mapping = map_times(&forces, &segments(), 1.0).unwrap();
        assert_eq!(mapping.taxonomy.phase, ElPhase::Swing);
        assert!(!mapping.taxonomy.constant);
    }

    #[test]
    fn no_edge_loading() {
        let forces = vec![force(1, 400.0, "Bearing")];
        let mapping = map_times(&forces, &segments(), 1.0).unwrap();
        assert_eq!(mapping.taxonomy, ElTaxonomy::default());
        assert_eq!(mapping.taxonomy.to_string(), "No EL, Not constant EL");
    }
}
