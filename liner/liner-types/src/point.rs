//! Surface sample types.

use std::fmt;

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CloudError, CloudResult};

/// Placeholder written for an empty region label slot.
pub const ABSENT_LABEL: &str = "NA";

/// Prefix carried by region labels that mark an edge-loading zone.
pub const EDGE_LOADING_PREFIX: &str = "EL";

/// Stable identifier of a surface point within one cloud generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointId(pub u32);

impl PointId {
    /// Wrap a raw id.
    #[inline]
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw integer value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PointId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// Ordered pair of region label slots.
///
/// A point lies in one region, or on the boundary between two. Empty slots
/// render as [`ABSENT_LABEL`].
///
/// # Example
///
/// ```
/// use liner_types::RegionLabels;
///
/// let labels = RegionLabels::pair("EL_1", "Bearing");
/// assert!(labels.is_boundary());
/// assert!(labels.is_edge_loading());
/// assert_eq!(labels.to_string(), "['EL_1', 'Bearing']");
///
/// let single = RegionLabels::single("Bearing");
/// assert_eq!(single.slot(1), "NA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionLabels {
    slots: [Option<String>; 2],
}

impl RegionLabels {
    /// Labels with a single region.
    #[must_use]
    pub fn single(label: impl Into<String>) -> Self {
        Self {
            slots: [Some(label.into()), None],
        }
    }

    /// Labels for a point on the boundary between two regions.
    #[must_use]
    pub fn pair(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            slots: [Some(first.into()), Some(second.into())],
        }
    }

    /// Build from a label list of length 0 to 2.
    ///
    /// Labels equal to [`ABSENT_LABEL`] are treated as empty slots.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::TooManyLabels`] for more than two labels.
    pub fn from_labels<I, S>(point: PointId, labels: I) -> CloudResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels
            .into_iter()
            .map(Into::into)
            .filter(|l| l != ABSENT_LABEL)
            .collect();
        if labels.len() > 2 {
            return Err(CloudError::TooManyLabels {
                point,
                count: labels.len(),
            });
        }
        let mut iter = labels.into_iter();
        Ok(Self {
            slots: [iter.next(), iter.next()],
        })
    }

    /// Label in slot `index`, or [`ABSENT_LABEL`] when empty or out of range.
    #[must_use]
    pub fn slot(&self, index: usize) -> &str {
        self.slots
            .get(index)
            .and_then(Option::as_deref)
            .unwrap_or(ABSENT_LABEL)
    }

    /// Iterate over the labels that are present.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().filter_map(Option::as_deref)
    }

    /// Number of labels present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// True when no label is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the point sits on the boundary of two regions.
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.len() == 2
    }

    /// True when any label names an edge-loading zone.
    #[must_use]
    pub fn is_edge_loading(&self) -> bool {
        self.iter().any(|l| l.starts_with(EDGE_LOADING_PREFIX))
    }
}

impl fmt::Display for RegionLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "['{}', '{}']", self.slot(0), self.slot(1))
    }
}

/// One sample of the liner bearing surface.
///
/// Coordinates are in millimetres: x is anteroposterior (positive anterior),
/// y superoinferior (positive superior), z mediolateral (positive medial).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurfacePoint {
    /// Identifier, unique within the cloud.
    pub id: PointId,
    /// Position (mm).
    pub position: Point3<f64>,
    /// Outward unit normal.
    pub normal: Vector3<f64>,
    /// Region label slots.
    pub regions: RegionLabels,
    /// Whether the point lies on the cup rim.
    pub edge: bool,
    /// Ids of adjacent points.
    pub neighbors: Vec<PointId>,
}

impl SurfacePoint {
    /// Create a non-rim point with no region labels and no neighbours.
    #[must_use]
    pub fn new(id: PointId, position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            id,
            position,
            normal,
            regions: RegionLabels::default(),
            edge: false,
            neighbors: Vec::new(),
        }
    }

    /// Set the region labels.
    #[must_use]
    pub fn with_regions(mut self, regions: RegionLabels) -> Self {
        self.regions = regions;
        self
    }

    /// Mark the point as lying on the rim.
    #[must_use]
    pub const fn with_edge(mut self, edge: bool) -> Self {
        self.edge = edge;
        self
    }

    /// Set the neighbour ids.
    #[must_use]
    pub fn with_neighbors(mut self, neighbors: Vec<PointId>) -> Self {
        self.neighbors = neighbors;
        self
    }

    /// True when the point carries two region labels.
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.regions.is_boundary()
    }

    /// True when `other` appears in this point's neighbour list.
    #[must_use]
    pub fn is_adjacent_to(&self, other: PointId) -> bool {
        self.neighbors.contains(&other)
    }
}
