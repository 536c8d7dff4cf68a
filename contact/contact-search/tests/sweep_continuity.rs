//! Sweep continuity on a smooth convex cap.
//!
//! The cap `y = sqrt(32² - x² - z²)` is sampled on a 1 mm grid. With a 16 mm
//! head the deepest point sits near `z = 2 × lateral mismatch`, so a linear
//! sweep moves the contact one grid step per increment.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use contact_search::{search_contacts, SearchParams};
use hashbrown::HashSet;
use liner_types::{PointCloud, PointId, SurfacePoint};
use nalgebra::{Point3, Vector3};

const HALF: i32 = 8;
const SIDE: i32 = 2 * HALF + 1;
const CAP_RADIUS: f64 = 32.0;

fn grid_id(x: i32, z: i32) -> PointId {
    PointId::new(u32::try_from((x + HALF) * SIDE + (z + HALF) + 1).unwrap())
}

fn cap() -> PointCloud {
    let mut points = Vec::new();
    for x in -HALF..=HALF {
        for z in -HALF..=HALF {
            let (xf, zf) = (f64::from(x), f64::from(z));
            let y = (CAP_RADIUS * CAP_RADIUS - xf * xf - zf * zf).sqrt();
            let position = Point3::new(xf, y, zf);
            let neighbors = [(x - 1, z), (x + 1, z), (x, z - 1), (x, z + 1)]
                .into_iter()
                .filter(|&(a, b)| a.abs() <= HALF && b.abs() <= HALF)
                .map(|(a, b)| grid_id(a, b))
                .collect();
            points.push(
                SurfacePoint::new(grid_id(x, z), position, -position.coords.normalize())
                    .with_neighbors(neighbors),
            );
        }
    }
    PointCloud::from_points(points).unwrap()
}

fn within_two_hops(cloud: &PointCloud, from: PointId, to: PointId) -> bool {
    let mut reach: HashSet<PointId> = HashSet::new();
    reach.insert(from);
    for &n in cloud.neighbors_of(from) {
        reach.insert(n);
        reach.extend(cloud.neighbors_of(n).iter().copied());
    }
    reach.contains(&to)
}

#[test]
fn contact_heights_rise_as_mismatch_shrinks() {
    let cloud = cap();
    let params = SearchParams::lateral(16.0, 3.0, 6);
    let outcome = search_contacts(&cloud, grid_id(0, HALF), &params).unwrap();

    assert_eq!(outcome.records.len(), 7);
    for pair in outcome.records.windows(2) {
        assert!(pair[1].position.y >= pair[0].position.y - 1e-9);
    }
}

#[test]
fn contact_moves_at_most_two_hops() {
    let cloud = cap();
    let params = SearchParams::lateral(16.0, 3.0, 6);
    let outcome = search_contacts(&cloud, grid_id(0, HALF), &params).unwrap();

    for pair in outcome.records.windows(2) {
        assert!(within_two_hops(&cloud, pair[0].source, pair[1].source));
    }
}

#[test]
fn contact_follows_twice_the_mismatch() {
    let cloud = cap();
    let params = SearchParams::lateral(16.0, 3.0, 6);
    let outcome = search_contacts(&cloud, grid_id(0, HALF), &params).unwrap();

    for record in &outcome.records {
        assert_eq!(record.position.x, 0.0);
        assert_eq!(record.position.z, 2.0 * record.lateral_mismatch);
        assert!(!record.low_confidence);
    }
}
