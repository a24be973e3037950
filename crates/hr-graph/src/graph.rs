//! Generic directed graph keyed by integer vertex and edge ids.
//!
//! # Data layout
//!
//! Vertices live in an ordered map keyed by [`VertexId`]; outgoing edges live
//! in a second ordered map from start vertex to a `Vec` of edges.  Iteration
//! order is ascending vertex id, and within one adjacency list, insertion
//! order.  Site networks are a few hundred vertices, so the `Vec` scans used
//! for pair lookup are cheaper than a second index would be.
//!
//! # Invariants
//!
//! - Every edge's `start` and `end` reference a vertex present in the graph.
//!   [`Graph::add_edge`] rejects dangling endpoints and
//!   [`Graph::remove_vertex`] cascades to edges in both directions.
//! - At most one edge exists per ordered `(start, end)` pair; adding a second
//!   one replaces the first.
//! - Vertex and edge ids share one [`IdAllocator`], so freshly minted ids
//!   never collide with ids inserted explicitly.

use std::collections::BTreeMap;

use hr_core::{EdgeId, IdAllocator, LatLng, VertexId};

use crate::{GraphError, GraphResult};

// ── Vertex / Edge ─────────────────────────────────────────────────────────────

/// A graph vertex: position plus caller payload.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex<V> {
    pub id:   VertexId,
    pub pos:  LatLng,
    pub data: V,
}

/// A directed edge.  `distance` is in metres.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge<E> {
    pub id:       EdgeId,
    pub start:    VertexId,
    pub end:      VertexId,
    pub distance: f64,
    pub data:     E,
}

impl<E> Edge<E> {
    /// Cost used by the path algorithms.
    ///
    /// A missing, NaN, negative or infinite distance makes the edge
    /// unusable: its weight is `+∞` and it never relaxes a path.
    #[inline]
    pub fn weight(&self) -> f64 {
        if self.distance.is_finite() && self.distance >= 0.0 {
            self.distance
        } else {
            f64::INFINITY
        }
    }

    #[inline]
    pub fn is_traversable(&self) -> bool {
        self.weight().is_finite()
    }
}

// ── Site payloads ─────────────────────────────────────────────────────────────

/// Vertex payload for graphs built from a site route.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexData {
    /// Route node this vertex was built from; `None` for vertices created
    /// during an editing session.
    pub backing_node: Option<VertexId>,
}

/// Edge payload for graphs built from a site route.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeData {
    pub backing_edge: Option<EdgeId>,
}

/// The graph type every site-level operation works on.
pub type SiteGraph = Graph<VertexData, EdgeData>;

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Directed graph with per-vertex adjacency lists.
///
/// `Clone` is a deep copy of the containers, which is what
/// [`copy`](Graph::copy) returns: mutating the copy never affects the
/// original.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph<V, E> {
    vertices:  BTreeMap<VertexId, Vertex<V>>,
    adjacency: BTreeMap<VertexId, Vec<Edge<E>>>,
    ids:       IdAllocator,
}

impl<V, E> Graph<V, E> {
    /// Construct an empty graph whose first fresh id is 0.
    pub fn new() -> Self {
        Self::with_allocator(IdAllocator::new())
    }

    /// Construct an empty graph that mints ids from `ids`.
    pub fn with_allocator(ids: IdAllocator) -> Self {
        Self {
            vertices:  BTreeMap::new(),
            adjacency: BTreeMap::new(),
            ids,
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The id the next `add_vertex`/`add_edge` would mint.
    pub fn next_id(&self) -> i64 {
        self.ids.peek()
    }

    /// Mutable access to the allocator, for minting placeholder ids.
    pub fn ids_mut(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    // ── Vertices ──────────────────────────────────────────────────────────

    /// Add a vertex under a freshly minted id.
    pub fn add_vertex(&mut self, pos: LatLng, data: V) -> VertexId {
        let id = VertexId(self.ids.next_raw());
        self.vertices.insert(id, Vertex { id, pos, data });
        id
    }

    /// Insert a vertex under an explicit id, e.g. one carried over from a
    /// route description.  An existing vertex with that id keeps its edges
    /// but has its position and payload replaced.
    pub fn insert_vertex(&mut self, id: VertexId, pos: LatLng, data: V) {
        self.ids.observe(id.0);
        self.vertices.insert(id, Vertex { id, pos, data });
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex<V>> {
        self.vertices.get(&id)
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex<V>> {
        self.vertices.get_mut(&id)
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// Vertices in ascending id order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<V>> + '_ {
        self.vertices.values()
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    /// Position of `id`, if present.
    pub fn position(&self, id: VertexId) -> Option<LatLng> {
        self.vertices.get(&id).map(|v| v.pos)
    }

    /// Remove `id`, its outgoing edges, and every edge ending at it.
    /// No-op if `id` is absent.
    pub fn remove_vertex(&mut self, id: VertexId) -> Option<Vertex<V>> {
        let removed = self.vertices.remove(&id)?;
        self.adjacency.remove(&id);
        for edges in self.adjacency.values_mut() {
            edges.retain(|e| e.end != id);
        }
        self.adjacency.retain(|_, edges| !edges.is_empty());
        Some(removed)
    }

    /// Remove every vertex with neither outgoing nor incoming edges.
    /// Returns the removed ids in ascending order.
    pub fn remove_orphan_vertices(&mut self) -> Vec<VertexId> {
        let orphans: Vec<VertexId> = self
            .vertices
            .keys()
            .copied()
            .filter(|&id| self.out_edges(id).is_empty() && !self.has_incoming(id))
            .collect();
        for id in &orphans {
            self.vertices.remove(id);
        }
        orphans
    }

    // ── Edges ─────────────────────────────────────────────────────────────

    /// Add or replace the edge `start → end`.
    ///
    /// If the pair already has an edge its distance and payload are replaced
    /// and it keeps its id; otherwise a fresh id is minted.
    ///
    /// # Errors
    ///
    /// [`GraphError::VertexNotFound`] if either endpoint is absent.
    pub fn add_edge(
        &mut self,
        start:    VertexId,
        end:      VertexId,
        distance: f64,
        data:     E,
    ) -> GraphResult<EdgeId> {
        self.check_endpoints(start, end)?;
        if let Some(existing) = self.edge_mut(start, end) {
            existing.distance = distance;
            existing.data = data;
            return Ok(existing.id);
        }
        let id = EdgeId(self.ids.next_raw());
        self.push_edge(Edge { id, start, end, distance, data });
        Ok(id)
    }

    /// Add or replace the edge `start → end` under an explicit id.
    pub fn insert_edge(
        &mut self,
        id:       EdgeId,
        start:    VertexId,
        end:      VertexId,
        distance: f64,
        data:     E,
    ) -> GraphResult<EdgeId> {
        self.check_endpoints(start, end)?;
        self.ids.observe(id.0);
        let edge = Edge { id, start, end, distance, data };
        match self.edge_mut(start, end) {
            Some(existing) => *existing = edge,
            None => self.push_edge(edge),
        }
        Ok(id)
    }

    /// Exact ordered-pair lookup.
    pub fn edge(&self, start: VertexId, end: VertexId) -> Option<&Edge<E>> {
        self.adjacency.get(&start)?.iter().find(|e| e.end == end)
    }

    /// The edge running the other way, if any.
    pub fn reverse_edge(&self, edge: &Edge<E>) -> Option<&Edge<E>> {
        self.edge(edge.end, edge.start)
    }

    /// Remove `start → end`.  No-op if absent.
    pub fn remove_edge(&mut self, start: VertexId, end: VertexId) -> Option<Edge<E>> {
        let edges = self.adjacency.get_mut(&start)?;
        let idx = edges.iter().position(|e| e.end == end)?;
        let removed = edges.remove(idx);
        if edges.is_empty() {
            self.adjacency.remove(&start);
        }
        Some(removed)
    }

    /// Outgoing edges of `id` in insertion order; empty if none.
    pub fn out_edges(&self, id: VertexId) -> &[Edge<E>] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every edge, grouped by ascending start vertex.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<E>> + '_ {
        self.adjacency.values().flatten()
    }

    /// `true` if any edge ends at `id`.
    pub fn has_incoming(&self, id: VertexId) -> bool {
        self.edges().any(|e| e.end == id)
    }

    fn check_endpoints(&self, start: VertexId, end: VertexId) -> GraphResult<()> {
        for id in [start, end] {
            if !self.vertices.contains_key(&id) {
                return Err(GraphError::VertexNotFound(id));
            }
        }
        Ok(())
    }

    fn edge_mut(&mut self, start: VertexId, end: VertexId) -> Option<&mut Edge<E>> {
        self.adjacency.get_mut(&start)?.iter_mut().find(|e| e.end == end)
    }

    fn push_edge(&mut self, edge: Edge<E>) {
        self.adjacency.entry(edge.start).or_default().push(edge);
    }
}

impl<V: Clone, E: Clone> Graph<V, E> {
    /// Independent copy with the same ids and data.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Snapshot of every vertex in ascending id order.
    pub fn vertices_list(&self) -> Vec<Vertex<V>> {
        self.vertices.values().cloned().collect()
    }
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Nearest vertex ────────────────────────────────────────────────────────────

/// Nearest vertex to `pos` among `candidates` by great-circle distance.
///
/// Linear scan; ties go to the first candidate in iteration order.
/// Returns `None` for an empty candidate set.
pub fn nearest_vertex<'a, V: 'a>(
    candidates: impl IntoIterator<Item = &'a Vertex<V>>,
    pos: LatLng,
) -> Option<VertexId> {
    let mut best: Option<(VertexId, f64)> = None;
    for v in candidates {
        let d = v.pos.distance_m(pos);
        if d.is_nan() {
            continue;
        }
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((v.id, d)),
        }
    }
    best.map(|(id, _)| id)
}

impl<V, E> Graph<V, E> {
    /// Nearest vertex of the whole graph to `pos`.
    pub fn nearest_vertex(&self, pos: LatLng) -> Option<VertexId> {
        nearest_vertex(self.vertices(), pos)
    }
}
