//! Warm-started neighbour-walk contact search.
//!
//! Each increment starts from the previous increment's contact and climbs
//! toward the point with the smallest vertical gap to the head. A pass looks
//! at the frontier plus one more hop of neighbours. When a pass finds no
//! better point but some candidates fell outside the head footprint, the
//! walk escapes toward the mismatch target, first through the outside
//! candidate's own neighbours and, failing that, to the cloud point nearest
//! the target. The second kind of escape flags the record low-confidence.

use std::time::Instant;

use hashbrown::HashSet;
use liner_types::{ContactRecord, PointCloud, PointId, SurfacePoint};
use tracing::{debug, info, warn};

use crate::error::{SearchError, SearchResult};
use crate::params::SearchParams;
use crate::result::SearchOutcome;
use crate::sweep::{ContactState, Sweep};

/// Per-increment walk statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct WalkStats {
    passes: usize,
    escapes: usize,
    fallbacks: usize,
    pass_limit_hit: bool,
}

/// Contact search over one reduced cloud.
#[derive(Debug, Clone)]
pub struct ContactSearch<'a> {
    cloud: &'a PointCloud,
    params: &'a SearchParams,
}

impl<'a> ContactSearch<'a> {
    /// Create a search over `cloud`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidParams`] if `params` fail validation.
    pub fn new(cloud: &'a PointCloud, params: &'a SearchParams) -> SearchResult<Self> {
        params.validate()?;
        Ok(Self { cloud, params })
    }

    /// Run the full sweep from `start`.
    ///
    /// # Errors
    ///
    /// - [`SearchError::UnresolvedCursor`] if `start` or any visited
    ///   neighbour id is missing from the cloud
    /// - [`SearchError::NoContact`] if an increment finds no point under the head
    /// - [`SearchError::DeadlineExceeded`] if the deadline passes
    pub fn run(&self, start: PointId) -> SearchResult<SearchOutcome> {
        let started = Instant::now();
        let sweep = Sweep::new(self.params);
        let mut records = Vec::with_capacity(sweep.len());
        let mut totals = WalkStats::default();
        let mut cursor = start;

        info!(
            points = self.cloud.len(),
            increments = sweep.len(),
            start = %start,
            "Starting contact search"
        );

        for state in sweep {
            let (best, stats) = self.increment(&state, cursor, started)?;
            let point = self.resolve(best, state.increment)?;

            let mut record = ContactRecord::capture(
                state.increment,
                point,
                state.anterior_mismatch,
                state.lateral_mismatch,
            );
            record.low_confidence = stats.fallbacks > 0 || stats.pass_limit_hit;

            debug!(
                increment = state.increment,
                lateral = state.lateral_mismatch,
                contact = %best,
                passes = stats.passes,
                escapes = stats.escapes,
                "Increment converged"
            );

            totals.passes += stats.passes;
            totals.escapes += stats.escapes;
            totals.fallbacks += stats.fallbacks;
            cursor = best;
            records.push(record);
        }

        let outcome = SearchOutcome {
            records,
            passes: totals.passes,
            escapes: totals.escapes,
            fallbacks: totals.fallbacks,
            elapsed: started.elapsed(),
        };
        info!(
            increments = outcome.records.len(),
            passes = outcome.passes,
            escapes = outcome.escapes,
            fallbacks = outcome.fallbacks,
            elapsed_ms = outcome.elapsed.as_millis(),
            "Contact search complete"
        );
        Ok(outcome)
    }

    fn resolve(&self, id: PointId, increment: u32) -> SearchResult<&'a SurfacePoint> {
        self.cloud
            .get(id)
            .ok_or(SearchError::UnresolvedCursor { id, increment })
    }

    /// Frontier plus one hop, deduplicated in first-seen order.
    fn candidates(&self, frontier: &[PointId], increment: u32) -> SearchResult<Vec<PointId>> {
        let mut seen = HashSet::with_capacity(frontier.len() * 8);
        let mut out = Vec::with_capacity(frontier.len() * 8);
        for &id in frontier {
            if seen.insert(id) {
                out.push(id);
            }
            for &n in &self.resolve(id, increment)?.neighbors {
                if seen.insert(n) {
                    out.push(n);
                }
            }
        }
        Ok(out)
    }

    fn target_distance(state: &ContactState, point: &SurfacePoint) -> f64 {
        state.planar_distance(&point.position)
    }

    /// Neighbour of `outside` nearest the target, within two head radii.
    fn local_escape(
        &self,
        state: &ContactState,
        outside: &SurfacePoint,
        used: &HashSet<PointId>,
    ) -> Option<PointId> {
        let mut best: Option<(f64, PointId)> = None;
        for &n in &outside.neighbors {
            if used.contains(&n) {
                continue;
            }
            let Some(p) = self.cloud.get(n) else {
                continue;
            };
            let d = Self::target_distance(state, p);
            let limit = best.map_or(2.0 * self.params.head_radius, |(bd, _)| bd);
            if d < limit {
                best = Some((d, n));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Cloud point nearest the target that has not been escaped to yet.
    fn global_escape(&self, state: &ContactState, used: &HashSet<PointId>) -> Option<PointId> {
        self.cloud
            .iter()
            .filter(|p| !used.contains(&p.id))
            .map(|p| (Self::target_distance(state, p), p.id))
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
            .map(|(_, id)| id)
    }

    fn increment(
        &self,
        state: &ContactState,
        cursor: PointId,
        started: Instant,
    ) -> SearchResult<(PointId, WalkStats)> {
        let radius = self.params.head_radius;
        let mut frontier = self.resolve(cursor, state.increment)?.neighbors.clone();
        let mut best: Option<(f64, PointId)> = None;
        let mut used: HashSet<PointId> = HashSet::new();
        let mut stats = WalkStats::default();

        loop {
            if let Some(deadline) = self.params.deadline {
                let elapsed = started.elapsed();
                if elapsed >= deadline {
                    return Err(SearchError::DeadlineExceeded {
                        increment: state.increment,
                        elapsed,
                    });
                }
            }
            if stats.passes >= self.params.max_passes_per_increment {
                warn!(
                    increment = state.increment,
                    passes = stats.passes,
                    "Pass limit reached, keeping best contact so far"
                );
                stats.pass_limit_hit = true;
                break;
            }
            stats.passes += 1;

            let candidates = self.candidates(&frontier, state.increment)?;
            let mut improved: Option<&SurfacePoint> = None;
            let mut outside: Vec<&SurfacePoint> = Vec::new();

            for id in candidates {
                let point = self.resolve(id, state.increment)?;
                match state.gap(&point.position, radius) {
                    Some(gap) if best.map_or(true, |(g, _)| gap < g) => {
                        best = Some((gap, id));
                        improved = Some(point);
                    }
                    Some(_) => {}
                    None => outside.push(point),
                }
            }

            if let Some(point) = improved {
                frontier = point.neighbors.clone();
                continue;
            }

            if let Some(target) = outside
                .iter()
                .find_map(|p| self.local_escape(state, p, &used))
            {
                used.insert(target);
                stats.escapes += 1;
                frontier = self.resolve(target, state.increment)?.neighbors.clone();
                continue;
            }

            if !outside.is_empty() {
                if let Some(target) = self.global_escape(state, &used) {
                    warn!(
                        increment = state.increment,
                        target = %target,
                        "Local escape failed, jumping to nearest point to target"
                    );
                    used.insert(target);
                    stats.escapes += 1;
                    stats.fallbacks += 1;
                    // The target itself is a candidate too.
                    let mut next = vec![target];
                    next.extend_from_slice(&self.resolve(target, state.increment)?.neighbors);
                    frontier = next;
                    continue;
                }
            }

            break;
        }

        best.map(|(_, id)| (id, stats))
            .ok_or(SearchError::NoContact {
                increment: state.increment,
            })
    }
}

/// Run a contact search sweep over `cloud` from `start`.
///
/// Convenience wrapper around [`ContactSearch`].
///
/// # Errors
///
/// See [`ContactSearch::new`] and [`ContactSearch::run`].
pub fn search_contacts(
    cloud: &PointCloud,
    start: PointId,
    params: &SearchParams,
) -> SearchResult<SearchOutcome> {
    ContactSearch::new(cloud, params)?.run(start)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use liner_types::SurfacePoint;
    use nalgebra::{Point3, Vector3};

    /// Flat `n x n` grid with 4-connectivity, spacing 2, ids `i * n + j + 1`
    /// at `x = 2i, z = 2j`.
    fn grid(n: u32) -> PointCloud {
        let id = |i: u32, j: u32| PointId::new(i * n + j + 1);
        let mut points = Vec::new();
        for i in 0..n {
            for j in 0..n {
                let mut nb = Vec::new();
                if i > 0 {
                    nb.push(id(i - 1, j));
                }
                if i + 1 < n {
                    nb.push(id(i + 1, j));
                }
                if j > 0 {
                    nb.push(id(i, j - 1));
                }
                if j + 1 < n {
                    nb.push(id(i, j + 1));
                }
                points.push(
                    SurfacePoint::new(
                        id(i, j),
                        Point3::new(2.0 * f64::from(i), 0.0, 2.0 * f64::from(j)),
                        Vector3::y(),
                    )
                    .with_neighbors(nb),
                );
            }
        }
        PointCloud::from_points(points).unwrap()
    }

    #[test]
    fn unknown_start_is_fatal() {
        let cloud = grid(3);
        let params = SearchParams::lateral(10.0, 4.0, 2);
        let err = search_contacts(&cloud, PointId::new(99), &params).unwrap_err();
        assert_eq!(
            err,
            SearchError::UnresolvedCursor {
                id: PointId::new(99),
                increment: 1
            }
        );
    }

    #[test]
    fn flat_grid_tracks_head_centre() {
        let cloud = grid(5);
        let params = SearchParams::lateral(10.0, 8.0, 4);
        let outcome = search_contacts(&cloud, PointId::new(5), &params).unwrap();

        assert_eq!(outcome.records.len(), 5);
        for record in &outcome.records {
            assert_eq!(record.position.x, 0.0);
            assert_eq!(record.position.z, record.lateral_mismatch);
            assert!(!record.low_confidence);
        }
    }

    #[test]
    fn escape_recovers_from_far_start() {
        // Start far outside the footprint of a small head.
        let cloud = grid(7);
        let params = SearchParams::lateral(3.0, 4.0, 2);
        let start = PointId::new(6 * 7 + 6 + 1);
        let outcome = search_contacts(&cloud, start, &params).unwrap();

        assert_eq!(outcome.records[0].position, Point3::new(0.0, 0.0, 4.0));
        assert!(outcome.escapes > 0);
    }

    #[test]
    fn deadline_of_zero_aborts() {
        let cloud = grid(3);
        let params = SearchParams::lateral(10.0, 4.0, 2).with_deadline(std::time::Duration::ZERO);
        let err = search_contacts(&cloud, PointId::new(1), &params);
        assert!(matches!(err, Err(SearchError::DeadlineExceeded { increment: 1, .. })));
    }

    #[test]
    fn pass_limit_marks_low_confidence() {
        let cloud = grid(5);
        let params = SearchParams::lateral(10.0, 8.0, 1).with_max_passes(1);
        let outcome = search_contacts(&cloud, PointId::new(21), &params).unwrap();
        assert!(outcome.records.iter().all(|r| r.low_confidence));
    }

    #[test]
    fn no_contact_when_head_misses_cloud() {
        let cloud = grid(2);
        let params = SearchParams::lateral(1.0, 40.0, 1).with_max_passes(3);
        let err = search_contacts(&cloud, PointId::new(1), &params).unwrap_err();
        assert_eq!(err, SearchError::NoContact { increment: 1 });
    }
}
