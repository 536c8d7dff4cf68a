//! Per-increment contact, force and timing records.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::point::{PointId, RegionLabels, SurfacePoint};

/// The deepest-penetration point captured for one sweep increment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactRecord {
    /// 1-based increment sequence number.
    pub sequence: u32,
    /// Id of the surface point in contact.
    pub source: PointId,
    /// Contact position (mm).
    pub position: Point3<f64>,
    /// Surface normal at the contact.
    pub normal: Vector3<f64>,
    /// Anterior mismatch at capture (mm).
    pub anterior_mismatch: f64,
    /// Lateral mismatch at capture (mm).
    pub lateral_mismatch: f64,
    /// Region labels of the contact point.
    pub regions: RegionLabels,
    /// Rim flag of the contact point.
    pub edge: bool,
    /// Set when the search had to jump away from its local neighbourhood.
    pub low_confidence: bool,
}

impl ContactRecord {
    /// Capture `point` as the contact for an increment.
    #[must_use]
    pub fn capture(
        sequence: u32,
        point: &SurfacePoint,
        anterior_mismatch: f64,
        lateral_mismatch: f64,
    ) -> Self {
        Self {
            sequence,
            source: point.id,
            position: point.position,
            normal: point.normal,
            anterior_mismatch,
            lateral_mismatch,
            regions: point.regions.clone(),
            edge: point.edge,
            low_confidence: false,
        }
    }

    /// True when the contact point lies in an edge-loading zone.
    #[must_use]
    pub fn is_edge_loading(&self) -> bool {
        self.regions.is_edge_loading()
    }
}

/// A contact record with its resolved contact force.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ForceRecord {
    /// The underlying contact.
    pub contact: ContactRecord,
    /// Axial (superoinferior) force (N).
    pub axial_force: f64,
    /// Resultant force magnitude (N).
    pub resultant_force: f64,
}

/// A force record placed on the gait cycle time axis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimedRecord {
    /// Contact id written to the output table.
    pub id: u32,
    /// The force record this time belongs to.
    pub force: ForceRecord,
    /// Time on the gait cycle (s).
    pub time: f64,
    /// True for trailing records that only advance time.
    pub synthetic: bool,
}

impl TimedRecord {
    /// The contact geometry behind this record.
    #[must_use]
    pub const fn contact(&self) -> &ContactRecord {
        &self.force.contact
    }
}
