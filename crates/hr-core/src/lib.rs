//! `hr-core` — foundational types for the haul-road route graph engine.
//!
//! This crate is a dependency of every other `hr-*` crate.  It has no
//! `hr-*` dependencies and only `thiserror` (plus optional `serde`) from
//! outside.
//!
//! # What lives here
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | [`ids`]   | `VertexId`, `EdgeId`, `LocationId`, `AssetTypeId`, `IdAllocator` |
//! | [`geo`]   | `LatLng`, haversine distance, bearing projection, map scale |
//! | [`error`] | `CoreError`, `CoreResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{
    LatLng, meters_per_pixel, meters_to_pixels, pixels_to_meters, polyline_length_m,
};
pub use ids::{AssetTypeId, EdgeId, IdAllocator, LocationId, VertexId};
