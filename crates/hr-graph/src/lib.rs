//! `hr-graph` — route graph ADT, route builders, and path algorithms.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`graph`]    | `Graph<V, E>`, `Vertex`, `Edge`, `SiteGraph`, `nearest_vertex`  |
//! | [`route`]    | `Route` input model, `build_graph`, `build_graph_for_asset_type`|
//! | [`dijkstra`] | `shortest_paths`, `ShortestPaths`, `shortest_path`              |
//! | [`scc`]      | Tarjan SCC, `prune_one_way`, `classify_segments`                |
//! | [`error`]    | `GraphError`, `GraphResult<T>`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod dijkstra;
pub mod error;
pub mod graph;
pub mod route;
pub mod scc;


pub use dijkstra::{ShortestPaths, shortest_path, shortest_paths};
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, EdgeData, Graph, SiteGraph, Vertex, VertexData, nearest_vertex};
pub use route::{
    RestrictionGroup, Route, RouteEdge, RouteNode, build_graph, build_graph_for_asset_type,
};
pub use scc::{
    Components, Segment, SegmentClass, circulation_groups, classify_segments, prune_one_way,
    strongly_connected_components,
};
