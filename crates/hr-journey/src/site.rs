//! Cached containment data for one site: location polygons plus the
//! grouping of graph vertices by containing location.
//!
//! Building a [`SiteIndex`] costs O(V × L) point-in-polygon tests.  It is a
//! plain value: the application keeps one per site and calls
//! [`SiteIndex::rebuild`] after the graph changes.

use geo::{Intersects, Line, Point, Polygon};
use log::{debug, warn};
use rustc_hash::FxHashMap;

use hr_core::{LatLng, LocationId, VertexId};
use hr_graph::Graph;

use crate::Location;
use crate::location::to_coord;

/// A location whose geofence converted to a valid polygon.
#[derive(Clone, Debug)]
struct IndexedLocation {
    location: Location,
    polygon:  Polygon<f64>,
}

impl IndexedLocation {
    /// Boundary points count as inside.
    fn contains(&self, pos: LatLng) -> bool {
        let pt: Point<f64> = to_coord(pos).into();
        self.polygon.intersects(&pt)
    }
}

#[derive(Clone, Debug, Default)]
pub struct SiteIndex {
    /// In input order; the first containing location wins on overlap.
    locations:          Vec<IndexedLocation>,
    vertices_by_loc:    FxHashMap<LocationId, Vec<VertexId>>,
    location_of_vertex: FxHashMap<VertexId, LocationId>,
}

impl SiteIndex {
    /// Index `locations` and group the vertices of `graph` by location.
    ///
    /// Locations whose geofence is not a usable polygon are logged and left
    /// out; nothing is ever contained in them.
    pub fn new<V, E>(graph: &Graph<V, E>, locations: impl IntoIterator<Item = Location>) -> Self {
        let mut indexed = Vec::new();
        for location in locations {
            match location.polygon() {
                Ok(polygon) => indexed.push(IndexedLocation { location, polygon }),
                Err(err) => warn!("ignoring geofence of {} ({}): {err}", location.id, location.name),
            }
        }
        let mut index = Self { locations: indexed, ..Self::default() };
        index.rebuild(graph);
        index
    }

    /// Recompute the vertex grouping against `graph`, keeping the
    /// locations.
    pub fn rebuild<V, E>(&mut self, graph: &Graph<V, E>) {
        self.vertices_by_loc.clear();
        self.location_of_vertex.clear();
        for vertex in graph.vertices() {
            if let Some(loc) = self.location_at(vertex.pos) {
                self.vertices_by_loc.entry(loc).or_default().push(vertex.id);
                self.location_of_vertex.insert(vertex.id, loc);
            }
        }
        debug!(
            "site index: {} locations, {} of {} vertices inside one",
            self.locations.len(),
            self.location_of_vertex.len(),
            graph.vertex_count(),
        );
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.iter().map(|l| &l.location).find(|l| l.id == id)
    }

    /// First location whose geofence contains `pos`.
    pub fn location_at(&self, pos: LatLng) -> Option<LocationId> {
        if !pos.is_finite() {
            return None;
        }
        self.locations
            .iter()
            .find(|l| l.contains(pos))
            .map(|l| l.location.id)
    }

    /// Vertices inside `id`, in graph iteration order.
    pub fn vertices_in(&self, id: LocationId) -> &[VertexId] {
        self.vertices_by_loc.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn location_of_vertex(&self, vertex: VertexId) -> Option<LocationId> {
        self.location_of_vertex.get(&vertex).copied()
    }

    /// `true` if the straight segment `a → b` touches any location other
    /// than `except`.
    pub fn line_crosses_location(&self, a: LatLng, b: LatLng, except: Option<LocationId>) -> bool {
        let line = Line::new(to_coord(a), to_coord(b));
        self.locations
            .iter()
            .filter(|l| Some(l.location.id) != except)
            .any(|l| line.intersects(&l.polygon))
    }
}
