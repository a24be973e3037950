//! R-tree index for snapping drawn points onto existing vertices.
//!
//! The tree works in raw `[lat, lng]` degrees.  A degree-space query
//! radius large enough to cover the metric tolerance yields candidates,
//! which are then checked with the exact haversine distance.

use std::f64::consts::PI;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use hr_core::geo::EARTH_RADIUS_M;
use hr_core::{LatLng, VertexId};
use hr_graph::Graph;

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct VertexEntry {
    point: [f64; 2], // [lat, lng]
    pos:   LatLng,
    id:    VertexId,
}

impl RTreeObject for VertexEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for VertexEntry {
    /// Squared Euclidean distance in degree space; only used to gather
    /// candidates.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlng = self.point[1] - point[1];
        dlat * dlat + dlng * dlng
    }
}

// ── SnapIndex ─────────────────────────────────────────────────────────────────

/// Spatial index over vertex positions with a fixed snap tolerance.
pub struct SnapIndex {
    tree:        RTree<VertexEntry>,
    tolerance_m: f64,
}

impl SnapIndex {
    /// Bulk-load every vertex of `graph`.
    pub fn new<V, E>(graph: &Graph<V, E>, tolerance_m: f64) -> Self {
        let entries: Vec<VertexEntry> = graph
            .vertices()
            .filter(|v| v.pos.is_finite())
            .map(|v| VertexEntry { point: [v.pos.lat, v.pos.lng], pos: v.pos, id: v.id })
            .collect();
        Self { tree: RTree::bulk_load(entries), tolerance_m }
    }

    pub fn tolerance_m(&self) -> f64 {
        self.tolerance_m
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Make a newly created vertex snappable.
    pub fn insert(&mut self, id: VertexId, pos: LatLng) {
        if pos.is_finite() {
            self.tree.insert(VertexEntry { point: [pos.lat, pos.lng], pos, id });
        }
    }

    /// The vertex nearest to `pos` within the tolerance, ties going to the
    /// smaller id.
    pub fn snap(&self, pos: LatLng) -> Option<VertexId> {
        if !pos.is_finite() || self.tolerance_m < 0.0 {
            return None;
        }
        let radius = degree_radius(pos, self.tolerance_m);
        let mut best: Option<(f64, VertexId)> = None;
        for entry in self.tree.locate_within_distance([pos.lat, pos.lng], radius * radius) {
            let d = entry.pos.distance_m(pos);
            if d > self.tolerance_m {
                continue;
            }
            let better = match best {
                None => true,
                Some((best_d, best_id)) => d < best_d || (d == best_d && entry.id < best_id),
            };
            if better {
                best = Some((d, entry.id));
            }
        }
        best.map(|(_, id)| id)
    }
}

/// A degree-space radius around `pos` that contains every point within
/// `meters` great-circle distance.
fn degree_radius(pos: LatLng, meters: f64) -> f64 {
    let dlat = (meters / EARTH_RADIUS_M) * 180.0 / PI;
    // Longitude degrees shrink towards the poles; use the widest latitude
    // the circle can reach.
    let widest = (pos.lat.abs() + dlat).min(89.999).to_radians();
    let dlng = dlat / widest.cos();
    // Small slack for floating-point rounding at the boundary.
    dlat.max(dlng) * 1.01
}
