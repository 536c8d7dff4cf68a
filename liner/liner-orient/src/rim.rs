//! Rim-only adjacency graph.
//!
//! Built after rotation from the cloud's edge points. A rim neighbour is kept
//! only when it is itself an edge point and lists the point back, so the
//! graph is symmetric even if the input adjacency is not.

use hashbrown::HashSet;
use liner_types::{PointCloud, PointId};
use nalgebra::Point3;
use tracing::debug;

/// A node of the rim graph.
#[derive(Debug, Clone, PartialEq)]
pub struct RimNode {
    /// Id of the edge point.
    pub id: PointId,
    /// Rotated position.
    pub position: Point3<f64>,
    /// Confirmed rim neighbours.
    pub neighbors: Vec<PointId>,
}

/// Adjacency restricted to rim points.
///
/// Nodes keep the cloud's storage order; lookup goes through an id-sorted index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RimGraph {
    nodes: Vec<RimNode>,
    index: Vec<(PointId, usize)>,
}

impl RimGraph {
    /// Build the rim graph of `cloud`.
    #[must_use]
    pub fn from_cloud(cloud: &PointCloud) -> Self {
        let edge_ids: HashSet<PointId> = cloud.edge_ids().collect();

        let nodes: Vec<RimNode> = cloud
            .iter()
            .filter(|p| p.edge)
            .map(|p| {
                let neighbors = p
                    .neighbors
                    .iter()
                    .copied()
                    .filter(|n| edge_ids.contains(n))
                    .filter(|&n| cloud.get(n).is_some_and(|q| q.is_adjacent_to(p.id)))
                    .collect();
                RimNode {
                    id: p.id,
                    position: p.position,
                    neighbors,
                }
            })
            .collect();

        let mut index: Vec<(PointId, usize)> =
            nodes.iter().enumerate().map(|(i, n)| (n.id, i)).collect();
        index.sort_unstable_by_key(|&(id, _)| id);

        let links: usize = nodes.iter().map(|n| n.neighbors.len()).sum();
        debug!(rim_points = nodes.len(), links, "Built rim graph");

        Self { nodes, index }
    }

    /// Number of rim points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the cloud had no edge points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Rim nodes in cloud storage order.
    #[must_use]
    pub fn nodes(&self) -> &[RimNode] {
        &self.nodes
    }

    /// The first rim point in storage order, the reference for rim walks.
    #[must_use]
    pub fn first(&self) -> Option<&RimNode> {
        self.nodes.first()
    }

    /// Look up a rim node by id.
    #[must_use]
    pub fn get(&self, id: PointId) -> Option<&RimNode> {
        self.index
            .binary_search_by_key(&id, |&(k, _)| k)
            .ok()
            .map(|slot| &self.nodes[self.index[slot].1])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use liner_types::SurfacePoint;
    use nalgebra::Vector3;

    fn pt(id: u32, edge: bool, neighbors: &[u32]) -> SurfacePoint {
        SurfacePoint::new(PointId::new(id), Point3::new(f64::from(id), 0.0, 0.0), Vector3::y())
            .with_edge(edge)
            .with_neighbors(neighbors.iter().copied().map(PointId::new).collect())
    }

    #[test]
    fn keeps_only_confirmed_rim_links() {
        // 1-2-3 rim ring fragment, 4 is interior, 3 does not list 2 back.
        let cloud = PointCloud::from_points(vec![
            pt(2, true, &[1, 3, 4]),
            pt(1, true, &[2, 4]),
            pt(3, true, &[4]),
            pt(4, false, &[1, 2, 3]),
        ])
        .unwrap();

        let rim = RimGraph::from_cloud(&cloud);
        assert_eq!(rim.len(), 3);
        assert_eq!(rim.first().unwrap().id, PointId::new(2));
        assert_eq!(rim.get(PointId::new(2)).unwrap().neighbors, vec![PointId::new(1)]);
        assert_eq!(rim.get(PointId::new(1)).unwrap().neighbors, vec![PointId::new(2)]);
        assert!(rim.get(PointId::new(3)).unwrap().neighbors.is_empty());
        assert!(rim.get(PointId::new(4)).is_none());
    }

    #[test]
    fn no_edge_points_gives_empty_graph() {
        let cloud = PointCloud::from_points(vec![pt(1, false, &[])]).unwrap();
        assert!(RimGraph::from_cloud(&cloud).is_empty());
    }
}
