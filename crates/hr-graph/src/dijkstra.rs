//! Single-source shortest paths and path reconstruction.
//!
//! # Cost units
//!
//! Costs are edge distances in metres ([`Edge::weight`]).  Edges with an
//! unusable distance weigh `+∞` and are skipped outright rather than relaxed,
//! so they can never shorten a path.
//!
//! [`Edge::weight`]: crate::Edge::weight

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use hr_core::{EdgeId, VertexId};

use crate::graph::Graph;

// ── ShortestPaths ─────────────────────────────────────────────────────────────

/// Distances and predecessor edges from one source to every vertex.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: VertexId,
    dist:   FxHashMap<VertexId, f64>,
    /// `prev[v] = (u, e)`: `v` was reached from `u` over edge `e`.
    prev:   FxHashMap<VertexId, (VertexId, EdgeId)>,
}

impl ShortestPaths {
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Shortest distance from the source, `+∞` if unreachable or unknown.
    pub fn distance_to(&self, target: VertexId) -> f64 {
        self.dist.get(&target).copied().unwrap_or(f64::INFINITY)
    }

    pub fn is_reachable(&self, target: VertexId) -> bool {
        self.distance_to(target).is_finite()
    }

    /// The vertex and edge `target` was reached through.
    pub fn predecessor(&self, target: VertexId) -> Option<(VertexId, EdgeId)> {
        self.prev.get(&target).copied()
    }

    /// Vertex ids from the source to `target` inclusive.  Empty when
    /// `target` is unreachable; `[source]` when `target == source`.
    pub fn path_to(&self, target: VertexId) -> Vec<VertexId> {
        if !self.is_reachable(target) {
            return Vec::new();
        }
        let mut path = vec![target];
        let mut cur = target;
        while let Some((prev, _)) = self.predecessor(cur) {
            path.push(prev);
            cur = prev;
        }
        path.reverse();
        path
    }

    /// Edge ids from the source to `target`, empty if unreachable.
    pub fn edge_path_to(&self, target: VertexId) -> Vec<EdgeId> {
        if !self.is_reachable(target) {
            return Vec::new();
        }
        let mut edges = Vec::new();
        let mut cur = target;
        while let Some((prev, edge)) = self.predecessor(cur) {
            edges.push(edge);
            cur = prev;
        }
        edges.reverse();
        edges
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Heap entry.  Ordered so that `BinaryHeap` (a max-heap) pops the smallest
/// cost first, breaking ties on the smaller vertex id for determinism.
#[derive(Copy, Clone, Debug)]
struct State {
    cost:   f64,
    vertex: VertexId,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

/// Dijkstra from `source` over every vertex of `graph`.
///
/// An absent `source` yields a result where everything is unreachable.
pub fn shortest_paths<V, E>(graph: &Graph<V, E>, source: VertexId) -> ShortestPaths {
    let mut dist: FxHashMap<VertexId, f64> = FxHashMap::default();
    let mut prev = FxHashMap::default();
    let mut finalized = FxHashSet::default();

    let mut heap = BinaryHeap::new();
    if graph.contains_vertex(source) {
        dist.insert(source, 0.0);
        heap.push(State { cost: 0.0, vertex: source });
    }

    while let Some(State { cost, vertex }) = heap.pop() {
        // Skip stale heap entries.
        if !finalized.insert(vertex) {
            continue;
        }

        for edge in graph.out_edges(vertex) {
            if finalized.contains(&edge.end) {
                continue;
            }
            let weight = edge.weight();
            if !weight.is_finite() {
                continue;
            }
            let next = cost + weight;
            let best = dist.get(&edge.end).copied().unwrap_or(f64::INFINITY);
            if next < best {
                dist.insert(edge.end, next);
                prev.insert(edge.end, (vertex, edge.id));
                heap.push(State { cost: next, vertex: edge.end });
            }
        }
    }

    ShortestPaths { source, dist, prev }
}

/// Shortest distance and vertex path from `from` to `to`, or `None` if `to`
/// is unreachable.
pub fn shortest_path<V, E>(
    graph: &Graph<V, E>,
    from: VertexId,
    to: VertexId,
) -> Option<(f64, Vec<VertexId>)> {
    let paths = shortest_paths(graph, from);
    let distance = paths.distance_to(to);
    if !distance.is_finite() {
        return None;
    }
    Some((distance, paths.path_to(to)))
}
