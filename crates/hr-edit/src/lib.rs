//! `hr-edit` — interactive path editing on the route graph.
//!
//! Drawn paths arrive as sequences of positions.  Points within a
//! zoom-dependent pixel tolerance of an existing vertex reuse it; the rest
//! become new vertices.  All operations are copy-on-write.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`settings`] | `SnapSettings` (zoom level, snap distance in pixels)  |
//! | [`snap`]     | `SnapIndex`, an R-tree over vertex positions          |
//! | [`edit`]     | `insert_path`, `remove_path`, `diff_path`             |
//! | [`error`]    | `EditError`, `EditResult<T>`                          |

pub mod edit;
pub mod error;
pub mod settings;
pub mod snap;

#[cfg(test)]
mod tests;

pub use edit::{PathDiff, PathEdit, diff_path, insert_path, remove_path};
pub use error::{EditError, EditResult};
pub use settings::SnapSettings;
pub use snap::SnapIndex;
