//! Copy-on-write path editing.
//!
//! Every operation here takes the current graph by reference and hands back
//! a new one (or a diff against it); the input is never mutated.  A drawn
//! path is a sequence of positions.  Each position snaps onto an existing
//! vertex within the configured tolerance or else becomes a new vertex, and
//! consecutive vertices are joined by edges in both directions.

use std::collections::BTreeSet;

use log::{debug, warn};

use hr_core::{CoreResult, EdgeId, LatLng, VertexId};
use hr_graph::{Edge, Graph, Vertex};

use crate::settings::SnapSettings;
use crate::snap::SnapIndex;
use crate::EditResult;

// ── Results ───────────────────────────────────────────────────────────────────

/// Outcome of [`insert_path`].
#[derive(Clone, Debug)]
pub struct PathEdit<V, E> {
    pub graph: Graph<V, E>,
    /// Vertex sequence the drawn points resolved to, with consecutive
    /// duplicates collapsed.
    pub path:  Vec<VertexId>,
}

/// What persisting a redrawn path would change.
///
/// Vertices and edges that do not exist yet carry placeholder (negative)
/// ids; the store replaces them with real ids when it commits.
#[derive(Clone, Debug, Default)]
pub struct PathDiff<V, E> {
    pub added_vertices:   Vec<Vertex<V>>,
    pub removed_vertices: Vec<VertexId>,
    pub added_edges:      Vec<Edge<E>>,
    pub removed_edges:    Vec<EdgeId>,
}

impl<V, E> PathDiff<V, E> {
    pub fn is_empty(&self) -> bool {
        self.added_vertices.is_empty()
            && self.removed_vertices.is_empty()
            && self.added_edges.is_empty()
            && self.removed_edges.is_empty()
    }
}

// ── Operations ────────────────────────────────────────────────────────────────

/// Add a drawn path to a copy of `graph`.
///
/// Points snap onto the nearest vertex within
/// [`SnapSettings::tolerance_m`], including vertices created earlier in the
/// same path.  Consecutive points that resolve to the same vertex are
/// merged, so no self-loops are created.  Each hop is upserted in both
/// directions with its great-circle length; an existing edge keeps its id
/// and payload.
///
/// # Errors
///
/// - [`EditError::InvalidSettings`](crate::EditError::InvalidSettings) for
///   a non-finite or negative zoom or pixel distance.
/// - [`CoreError::NonFiniteCoordinate`](hr_core::CoreError) for a NaN or
///   infinite point.
pub fn insert_path<V, E>(
    graph:    &Graph<V, E>,
    points:   &[LatLng],
    settings: &SnapSettings,
) -> EditResult<PathEdit<V, E>>
where
    V: Clone + Default,
    E: Clone + Default,
{
    settings.validate()?;
    check_points(points)?;

    let mut out = graph.copy();
    let mut index = SnapIndex::new(&out, settings.tolerance_m());
    let mut path: Vec<VertexId> = Vec::with_capacity(points.len());
    let mut created = 0usize;

    for &pos in points {
        let id = match index.snap(pos) {
            Some(id) => id,
            None => {
                let id = out.add_vertex(pos, V::default());
                index.insert(id, pos);
                created += 1;
                id
            }
        };
        if path.last() != Some(&id) {
            path.push(id);
        }
    }

    for hop in path.windows(2) {
        let (a, b) = (hop[0], hop[1]);
        let distance = hop_distance(&out, a, b);
        upsert_keeping_data(&mut out, a, b, distance)?;
        upsert_keeping_data(&mut out, b, a, distance)?;
    }

    debug!(
        "insert_path: {} points -> {} vertices ({created} new), tolerance {:.2} m",
        points.len(),
        path.len(),
        index.tolerance_m()
    );
    Ok(PathEdit { graph: out, path })
}

/// Remove the edges along `path` (both directions) from a copy of `graph`,
/// then drop every vertex left without edges.
///
/// Hops with no edge are skipped.
pub fn remove_path<V, E>(graph: &Graph<V, E>, path: &[VertexId]) -> Graph<V, E>
where
    V: Clone,
    E: Clone,
{
    let mut out = graph.copy();
    let mut removed = 0usize;
    for hop in path.windows(2) {
        let (a, b) = (hop[0], hop[1]);
        removed += usize::from(out.remove_edge(a, b).is_some());
        removed += usize::from(out.remove_edge(b, a).is_some());
    }
    let orphans = out.remove_orphan_vertices();
    debug!(
        "remove_path: {} hops, {removed} edges and {} orphaned vertices removed",
        path.len().saturating_sub(1),
        orphans.len()
    );
    out
}

/// Compute what replacing the drawn path `old_points` with `new_points`
/// would change, without touching `graph`.
///
/// Old points are matched to existing vertices by snapping; points that
/// match nothing are ignored.  New points snap the same way, and those that
/// match nothing become placeholder vertices.  A vertex is reported removed
/// only when it leaves the path and would be left without edges.
pub fn diff_path<V, E>(
    graph:      &Graph<V, E>,
    new_points: &[LatLng],
    old_points: &[LatLng],
    settings:   &SnapSettings,
) -> EditResult<PathDiff<V, E>>
where
    V: Clone + Default,
    E: Clone + Default,
{
    settings.validate()?;
    check_points(new_points)?;
    check_points(old_points)?;

    let tolerance = settings.tolerance_m();
    let base_index = SnapIndex::new(graph, tolerance);

    // Old path: existing vertices only.
    let mut old_path: Vec<VertexId> = Vec::with_capacity(old_points.len());
    for &pos in old_points {
        match base_index.snap(pos) {
            Some(id) if old_path.last() != Some(&id) => old_path.push(id),
            Some(_) => {}
            None => warn!("diff_path: old point {pos} matches no vertex; ignored"),
        }
    }
    let mut old_edges: BTreeSet<EdgeId> = BTreeSet::new();
    for hop in old_path.windows(2) {
        for (a, b) in [(hop[0], hop[1]), (hop[1], hop[0])] {
            if let Some(e) = graph.edge(a, b) {
                old_edges.insert(e.id);
            }
        }
    }

    // New path on a scratch copy, minting placeholders for anything new.
    let mut scratch = graph.copy();
    let mut index = base_index;
    let mut new_path: Vec<VertexId> = Vec::with_capacity(new_points.len());
    for &pos in new_points {
        let id = match index.snap(pos) {
            Some(id) => id,
            None => {
                let id = VertexId(scratch.ids_mut().next_placeholder());
                scratch.insert_vertex(id, pos, V::default());
                index.insert(id, pos);
                id
            }
        };
        if new_path.last() != Some(&id) {
            new_path.push(id);
        }
    }

    let mut new_edges: BTreeSet<EdgeId> = BTreeSet::new();
    let mut added_edges: Vec<Edge<E>> = Vec::new();
    for hop in new_path.windows(2) {
        let distance = hop_distance(&scratch, hop[0], hop[1]);
        for (a, b) in [(hop[0], hop[1]), (hop[1], hop[0])] {
            if let Some(e) = scratch.edge(a, b) {
                new_edges.insert(e.id);
                continue;
            }
            let id = EdgeId(scratch.ids_mut().next_placeholder());
            scratch.insert_edge(id, a, b, distance, E::default())?;
            new_edges.insert(id);
            if let Some(e) = scratch.edge(a, b) {
                added_edges.push(e.clone());
            }
        }
    }
    // Existing edges that join the path for the first time.
    for e in graph.edges() {
        if new_edges.contains(&e.id) && !old_edges.contains(&e.id) {
            added_edges.push(e.clone());
        }
    }
    added_edges.sort_by_key(|e| e.id);

    // Drop the old path's edges that the new path does not reuse, then see
    // which old vertices are stranded.
    let removed_edges: Vec<EdgeId> = old_edges.difference(&new_edges).copied().collect();
    for hop in old_path.windows(2) {
        for (a, b) in [(hop[0], hop[1]), (hop[1], hop[0])] {
            let stale = scratch.edge(a, b).is_some_and(|e| !new_edges.contains(&e.id));
            if stale {
                scratch.remove_edge(a, b);
            }
        }
    }

    let old_set: BTreeSet<VertexId> = old_path.iter().copied().collect();
    let new_set: BTreeSet<VertexId> = new_path.iter().copied().collect();

    let added_vertices: Vec<Vertex<V>> = new_set
        .difference(&old_set)
        .filter_map(|&id| scratch.vertex(id).cloned())
        .collect();
    let removed_vertices: Vec<VertexId> = old_set
        .difference(&new_set)
        .copied()
        .filter(|&id| scratch.out_edges(id).is_empty() && !scratch.has_incoming(id))
        .collect();

    debug!(
        "diff_path: +{} / -{} vertices, +{} / -{} edges",
        added_vertices.len(),
        removed_vertices.len(),
        added_edges.len(),
        removed_edges.len()
    );
    Ok(PathDiff { added_vertices, removed_vertices, added_edges, removed_edges })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn check_points(points: &[LatLng]) -> CoreResult<()> {
    for p in points {
        p.checked()?;
    }
    Ok(())
}

fn hop_distance<V, E>(graph: &Graph<V, E>, a: VertexId, b: VertexId) -> f64 {
    match (graph.position(a), graph.position(b)) {
        (Some(pa), Some(pb)) => pa.distance_m(pb),
        _ => f64::INFINITY,
    }
}

/// Upsert `a → b` with a fresh distance, keeping any existing payload.
fn upsert_keeping_data<V, E: Clone + Default>(
    graph:    &mut Graph<V, E>,
    a:        VertexId,
    b:        VertexId,
    distance: f64,
) -> EditResult<EdgeId> {
    let data = graph.edge(a, b).map(|e| e.data.clone()).unwrap_or_default();
    Ok(graph.add_edge(a, b, distance, data)?)
}
