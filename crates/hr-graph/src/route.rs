//! Persisted road network description and the builders that turn it into a
//! [`SiteGraph`].
//!
//! A [`Route`] is read-only input owned by the surrounding application.
//! Builders are pure: they read a route and return a fresh graph, so callers
//! can cache the result per site and rebuild it when the route changes.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use hr_core::{AssetTypeId, EdgeId, IdAllocator, LatLng, VertexId};

use crate::graph::{EdgeData, SiteGraph, VertexData};
use crate::{GraphError, GraphResult};

// ── Route model ───────────────────────────────────────────────────────────────

/// A road network node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteNode {
    pub id:  VertexId,
    pub lat: f64,
    pub lng: f64,
}

impl RouteNode {
    pub fn pos(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// A directed road segment.  Two-way roads are stored as two of these.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RouteEdge {
    pub id:              EdgeId,
    pub vertex_start_id: VertexId,
    pub vertex_end_id:   VertexId,
    /// Metres.  `None` when the store never computed it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub distance:        Option<f64>,
}

/// A set of edges that only the listed vehicle classes may use.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RestrictionGroup {
    pub asset_type_ids: BTreeSet<AssetTypeId>,
    pub edge_ids:       Vec<EdgeId>,
}

/// Durable description of a site's road network.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Route {
    pub vertex_map:         BTreeMap<VertexId, RouteNode>,
    pub edge_map:           BTreeMap<EdgeId, RouteEdge>,
    /// Edge ids in drawing order.  Determines adjacency order in built
    /// graphs; edges missing from this list follow in ascending id order.
    pub element_ids:        Vec<EdgeId>,
    pub restriction_groups: Vec<RestrictionGroup>,
    /// Id counter carried with the snapshot.  When present it seeds the
    /// built graph's allocator, so ids released by deleted records are not
    /// reused.
    pub next_id:            Option<i64>,
}

impl Route {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check that every edge references known vertices and every restriction
    /// group references known edges.
    ///
    /// Builders tolerate both problems (skipping the offending records); this
    /// is for callers that want to reject such a route outright.
    pub fn validate(&self) -> GraphResult<()> {
        for edge in self.edge_map.values() {
            for vertex in [edge.vertex_start_id, edge.vertex_end_id] {
                if !self.vertex_map.contains_key(&vertex) {
                    return Err(GraphError::DanglingEdge { edge: edge.id, vertex });
                }
            }
        }
        for group in &self.restriction_groups {
            if let Some(&missing) = group.edge_ids.iter().find(|id| !self.edge_map.contains_key(*id)) {
                return Err(GraphError::UnknownEdge(missing));
            }
        }
        Ok(())
    }

    /// Edges in build order: `element_ids` first, then the rest by id.
    /// Each edge is yielded once.
    pub fn ordered_edges(&self) -> Vec<&RouteEdge> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::with_capacity(self.edge_map.len());
        for id in &self.element_ids {
            match self.edge_map.get(id) {
                Some(edge) if seen.insert(*id) => out.push(edge),
                Some(_) => {}
                None => warn!("element id {id} has no matching edge; skipping"),
            }
        }
        for (id, edge) in &self.edge_map {
            if seen.insert(*id) {
                out.push(edge);
            }
        }
        out
    }

    /// Per-edge set of asset types allowed on restricted edges.  Edges absent
    /// from the map are unrestricted.
    pub fn restrictions(&self) -> FxHashMap<EdgeId, FxHashSet<AssetTypeId>> {
        let mut allowed: FxHashMap<EdgeId, FxHashSet<AssetTypeId>> = FxHashMap::default();
        for group in &self.restriction_groups {
            for edge in &group.edge_ids {
                allowed
                    .entry(*edge)
                    .or_default()
                    .extend(group.asset_type_ids.iter().copied());
            }
        }
        allowed
    }

    /// Ids of the edges `asset_type` may drive on, in build order.
    pub fn edges_for_asset_type(&self, asset_type: AssetTypeId) -> Vec<EdgeId> {
        let restrictions = self.restrictions();
        self.ordered_edges()
            .into_iter()
            .filter(|e| usable_by(&restrictions, e.id, asset_type))
            .map(|e| e.id)
            .collect()
    }
}

fn usable_by(
    restrictions: &FxHashMap<EdgeId, FxHashSet<AssetTypeId>>,
    edge: EdgeId,
    asset_type: AssetTypeId,
) -> bool {
    restrictions
        .get(&edge)
        .is_none_or(|allowed| allowed.contains(&asset_type))
}

// ── Builders ──────────────────────────────────────────────────────────────────

/// Build a graph with every vertex and edge of `route`.
///
/// Vertex and edge ids are carried over unchanged.  Edges whose endpoints
/// are missing are skipped with a warning; edges without a distance get an
/// infinite one and are never routed over.
pub fn build_graph(route: &Route) -> SiteGraph {
    build_filtered(route, |_| true)
}

/// Build a graph containing only the edges usable by `asset_type`.
///
/// All vertices are kept, so locations stay resolvable even when a vehicle
/// class cannot reach them.
pub fn build_graph_for_asset_type(route: &Route, asset_type: AssetTypeId) -> SiteGraph {
    let restrictions = route.restrictions();
    build_filtered(route, |e| usable_by(&restrictions, e.id, asset_type))
}

fn build_filtered(route: &Route, keep: impl Fn(&RouteEdge) -> bool) -> SiteGraph {
    let ids = IdAllocator::starting_at(route.next_id.unwrap_or(0));
    let mut graph = SiteGraph::with_allocator(ids);

    for node in route.vertex_map.values() {
        graph.insert_vertex(node.id, node.pos(), VertexData { backing_node: Some(node.id) });
    }

    let mut skipped = 0usize;
    for edge in route.ordered_edges() {
        if !keep(edge) {
            skipped += 1;
            continue;
        }
        let distance = match edge.distance {
            Some(d) if d.is_finite() && d >= 0.0 => d,
            other => {
                warn!("edge {} has unusable distance {other:?}; treating as impassable", edge.id);
                f64::INFINITY
            }
        };
        let data = EdgeData { backing_edge: Some(edge.id) };
        if let Err(err) =
            graph.insert_edge(edge.id, edge.vertex_start_id, edge.vertex_end_id, distance, data)
        {
            warn!("skipping edge {}: {err}", edge.id);
        }
    }

    debug!(
        "built graph: {} vertices, {} edges ({} filtered out), next id {}",
        graph.vertex_count(),
        graph.edge_count(),
        skipped,
        graph.next_id(),
    );
    graph
}
