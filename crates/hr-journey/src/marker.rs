//! Resolution of travel endpoints to graph vertices.

use log::trace;

use hr_core::{LatLng, LocationId, VertexId};
use hr_graph::{Graph, nearest_vertex};

use crate::SiteIndex;

/// What the caller asked to travel from or to.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Endpoint {
    /// A named location; resolves to a vertex inside its geofence.
    Location(LocationId),
    /// A raw coordinate, e.g. a vehicle's GPS fix.
    Position(LatLng),
}

/// A resolved endpoint.
///
/// `vertex` is `None` when nothing in the graph could be matched; journey
/// construction then reports "no route".
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marker {
    pub position: Option<LatLng>,
    pub location: Option<LocationId>,
    pub vertex:   Option<VertexId>,
}

impl Marker {
    pub fn is_resolved(&self) -> bool {
        self.vertex.is_some()
    }
}

/// Resolve `endpoint` against `graph` using the containment data in `site`.
///
/// - `Location(id)`: the first vertex inside the location, if any.
/// - `Position(p)`: the nearest vertex inside the location containing `p`;
///   if `p` is in no location, or that location has no vertices, the nearest
///   vertex of the whole graph.
pub fn resolve<V, E>(graph: &Graph<V, E>, site: &SiteIndex, endpoint: Endpoint) -> Marker {
    let marker = match endpoint {
        Endpoint::Location(id) => Marker {
            position: None,
            location: Some(id),
            vertex:   site
                .vertices_in(id)
                .iter()
                .copied()
                .find(|v| graph.contains_vertex(*v)),
        },
        Endpoint::Position(pos) => {
            let location = site.location_at(pos);
            let local = location.and_then(|loc| {
                let members = site.vertices_in(loc).iter().filter_map(|id| graph.vertex(*id));
                nearest_vertex(members, pos)
            });
            Marker {
                position: Some(pos),
                location,
                vertex: local.or_else(|| graph.nearest_vertex(pos)),
            }
        }
    };
    trace!("resolved {endpoint:?} to {marker:?}");
    marker
}
