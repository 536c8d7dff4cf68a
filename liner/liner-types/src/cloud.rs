//! Id-indexed point cloud store.
//!
//! Points live in a dense array in their input order. A separate id-sorted
//! index gives `O(log n)` id lookup; all cross references (neighbour lists,
//! search cursors) are ids, never references into the array.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CloudError, CloudResult};
use crate::point::{PointId, SurfacePoint};

/// A validated liner point cloud.
///
/// # Example
///
/// ```
/// use liner_types::{PointCloud, PointId, SurfacePoint};
/// use nalgebra::{Point3, Vector3};
///
/// let a = SurfacePoint::new(PointId::new(2), Point3::new(0.0, 0.0, 0.0), Vector3::y())
///     .with_neighbors(vec![PointId::new(1)]);
/// let b = SurfacePoint::new(PointId::new(1), Point3::new(1.0, 0.0, 0.0), Vector3::y())
///     .with_neighbors(vec![PointId::new(2)]);
///
/// let cloud = PointCloud::from_points(vec![a, b]).unwrap();
/// assert_eq!(cloud.len(), 2);
/// assert_eq!(cloud.get(PointId::new(1)).unwrap().position.x, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointCloud {
    points: Vec<SurfacePoint>,
    /// `(id, position in points)` sorted by id.
    index: Vec<(PointId, usize)>,
}

impl PointCloud {
    /// Build a cloud, checking ids are unique and every neighbour resolves.
    ///
    /// # Errors
    ///
    /// [`CloudError::DuplicateId`] for a repeated id and
    /// [`CloudError::DanglingNeighbor`] for a neighbour id absent from the set.
    pub fn from_points(points: Vec<SurfacePoint>) -> CloudResult<Self> {
        let index = build_index(&points)?;
        let cloud = Self { points, index };
        for point in &cloud.points {
            if let Some(&missing) = point.neighbors.iter().find(|n| !cloud.contains(**n)) {
                return Err(CloudError::DanglingNeighbor {
                    point: point.id,
                    neighbor: missing,
                });
            }
        }
        Ok(cloud)
    }

    /// Number of points.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the cloud holds no points.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points in storage order.
    #[inline]
    #[must_use]
    pub fn points(&self) -> &[SurfacePoint] {
        &self.points
    }

    /// Iterate over points in storage order.
    pub fn iter(&self) -> std::slice::Iter<'_, SurfacePoint> {
        self.points.iter()
    }

    /// Storage position of `id`.
    #[must_use]
    pub fn index_of(&self, id: PointId) -> Option<usize> {
        self.index
            .binary_search_by_key(&id, |&(k, _)| k)
            .ok()
            .map(|slot| self.index[slot].1)
    }

    /// True when `id` is in the cloud.
    #[must_use]
    pub fn contains(&self, id: PointId) -> bool {
        self.index_of(id).is_some()
    }

    /// Look up a point by id.
    #[must_use]
    pub fn get(&self, id: PointId) -> Option<&SurfacePoint> {
        self.index_of(id).map(|i| &self.points[i])
    }

    /// Look up a point by id, failing with [`CloudError::UnknownId`].
    ///
    /// # Errors
    ///
    /// Returns an error when the id is absent.
    pub fn require(&self, id: PointId) -> CloudResult<&SurfacePoint> {
        self.get(id).ok_or(CloudError::UnknownId { id })
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = PointId> + '_ {
        self.index.iter().map(|&(id, _)| id)
    }

    /// Ids of rim points, in ascending order.
    pub fn edge_ids(&self) -> impl Iterator<Item = PointId> + '_ {
        self.index
            .iter()
            .filter(|&&(_, i)| self.points[i].edge)
            .map(|&(id, _)| id)
    }

    /// Neighbours of `id` (empty when the id is unknown).
    #[must_use]
    pub fn neighbors_of(&self, id: PointId) -> &[PointId] {
        self.get(id).map_or(&[], |p| p.neighbors.as_slice())
    }

    /// A new cloud with every position and normal mapped through `f`.
    ///
    /// Ids, labels and adjacency are carried over unchanged; `self` is untouched.
    #[must_use]
    pub fn map_geometry<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Point3<f64>, &Vector3<f64>) -> (Point3<f64>, Vector3<f64>),
    {
        let points = self
            .points
            .iter()
            .map(|p| {
                let (position, normal) = f(&p.position, &p.normal);
                SurfacePoint {
                    position,
                    normal,
                    ..p.clone()
                }
            })
            .collect();
        Self {
            points,
            index: self.index.clone(),
        }
    }

    /// A new cloud with only the points accepted by `keep`.
    ///
    /// Neighbour lists are rewritten to reference surviving ids only, so the
    /// result never holds a dangling neighbour.
    #[must_use]
    pub fn retain<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&SurfacePoint) -> bool,
    {
        let kept: Vec<&SurfacePoint> = self.points.iter().filter(|p| keep(p)).collect();
        let mut survivors: Vec<PointId> = kept.iter().map(|p| p.id).collect();
        survivors.sort_unstable();

        let points: Vec<SurfacePoint> = kept
            .into_iter()
            .map(|p| SurfacePoint {
                neighbors: p
                    .neighbors
                    .iter()
                    .copied()
                    .filter(|n| survivors.binary_search(n).is_ok())
                    .collect(),
                ..p.clone()
            })
            .collect();

        let index = index_unchecked(&points);
        Self { points, index }
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a SurfacePoint;
    type IntoIter = std::slice::Iter<'a, SurfacePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

fn build_index(points: &[SurfacePoint]) -> CloudResult<Vec<(PointId, usize)>> {
    let index = index_unchecked(points);
    if let Some(pair) = index.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(CloudError::DuplicateId { id: pair[0].0 });
    }
    Ok(index)
}

fn index_unchecked(points: &[SurfacePoint]) -> Vec<(PointId, usize)> {
    let mut index: Vec<(PointId, usize)> =
        points.iter().enumerate().map(|(i, p)| (p.id, i)).collect();
    index.sort_unstable_by_key(|&(id, _)| id);
    index
}
