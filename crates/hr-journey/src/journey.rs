//! Journey construction between two resolved markers.
//!
//! # Direct-line shortcuts
//!
//! Inside one location (a pit floor, a stockpile pad) vehicles can usually
//! drive straight across instead of following the mapped internal roads,
//! and the same holds for open ground between locations.  When enabled by
//! [`JourneyConfig::allow_shortcuts`], a straight line replaces the routed
//! path if no other location's geofence lies across it and it is not longer:
//!
//! | Markers                       | Shortcut taken when       |
//! |-------------------------------|---------------------------|
//! | both in the same location     | `direct < routed`         |
//! | neither in any location       | `direct <= routed`        |
//! | anything else                 | never                     |
//!
//! Shortcuts need raw positions on both markers.

use log::trace;

use hr_core::{LatLng, VertexId, polyline_length_m};
use hr_graph::{Graph, shortest_paths};

use crate::{Endpoint, Marker, SiteIndex, resolve};

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JourneyConfig {
    /// Replace routed paths by straight lines where the table above allows.
    pub allow_shortcuts: bool,
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self { allow_shortcuts: true }
    }
}

// ── Journey ───────────────────────────────────────────────────────────────────

/// A travel plan between two markers.
///
/// `total_distance` is always the haversine length of `spatial_path`; the
/// fields are private so it cannot drift from the path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Journey {
    source:         Marker,
    dest:           Marker,
    vertex_path:    Vec<VertexId>,
    spatial_path:   Vec<LatLng>,
    total_distance: f64,
}

impl Journey {
    pub fn new(
        source:       Marker,
        dest:         Marker,
        vertex_path:  Vec<VertexId>,
        spatial_path: Vec<LatLng>,
    ) -> Self {
        let total_distance = polyline_length_m(&spatial_path);
        Self { source, dest, vertex_path, spatial_path, total_distance }
    }

    /// Straight line between the two raw positions.
    fn direct(source: Marker, dest: Marker, a: LatLng, b: LatLng) -> Self {
        Self::new(source, dest, Vec::new(), vec![a, b])
    }

    pub fn source(&self) -> &Marker {
        &self.source
    }

    pub fn dest(&self) -> &Marker {
        &self.dest
    }

    pub fn vertex_path(&self) -> &[VertexId] {
        &self.vertex_path
    }

    pub fn spatial_path(&self) -> &[LatLng] {
        &self.spatial_path
    }

    /// Metres.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// `true` if the journey bypasses the graph entirely.
    pub fn is_direct(&self) -> bool {
        self.vertex_path.is_empty()
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

/// Build a journey between two resolved markers.
///
/// Returns `None` ("no route") if either marker has no vertex, or if the
/// destination vertex is unreachable and no shortcut applies.
pub fn build_journey<V, E>(
    graph:  &Graph<V, E>,
    site:   &SiteIndex,
    source: Marker,
    dest:   Marker,
    config: &JourneyConfig,
) -> Option<Journey> {
    let (from, to) = (source.vertex?, dest.vertex?);
    let routed = routed_journey(graph, source, dest, from, to);

    if config.allow_shortcuts {
        if let Some(direct) = shortcut(site, source, dest, routed.as_ref()) {
            return Some(direct);
        }
    }
    routed
}

/// Resolve both endpoints, then [`build_journey`].
pub fn plan_journey<V, E>(
    graph:  &Graph<V, E>,
    site:   &SiteIndex,
    from:   Endpoint,
    to:     Endpoint,
    config: &JourneyConfig,
) -> Option<Journey> {
    let source = resolve(graph, site, from);
    let dest = resolve(graph, site, to);
    build_journey(graph, site, source, dest, config)
}

/// The graph-following journey: source position, vertex path, destination
/// position.
fn routed_journey<V, E>(
    graph:  &Graph<V, E>,
    source: Marker,
    dest:   Marker,
    from:   VertexId,
    to:     VertexId,
) -> Option<Journey> {
    let vertex_path = shortest_paths(graph, from).path_to(to);
    if vertex_path.is_empty() {
        return None;
    }

    let mut spatial_path = Vec::with_capacity(vertex_path.len() + 2);
    spatial_path.extend(source.position);
    spatial_path.extend(vertex_path.iter().filter_map(|v| graph.position(*v)));
    spatial_path.extend(dest.position);

    Some(Journey::new(source, dest, vertex_path, spatial_path))
}

fn shortcut(
    site:   &SiteIndex,
    source: Marker,
    dest:   Marker,
    routed: Option<&Journey>,
) -> Option<Journey> {
    let (a, b) = (source.position?, dest.position?);
    let direct = a.distance_m(b);
    let routed_distance = routed.map_or(f64::INFINITY, Journey::total_distance);

    let take = match (source.location, dest.location) {
        (Some(x), Some(y)) if x == y => {
            direct < routed_distance && !site.line_crosses_location(a, b, Some(x))
        }
        (None, None) => direct <= routed_distance && !site.line_crosses_location(a, b, None),
        _ => false,
    };
    if take {
        trace!("direct line {a} → {b} ({direct:.1} m) beats routed {routed_distance:.1} m");
        return Some(Journey::direct(source, dest, a, b));
    }
    None
}
