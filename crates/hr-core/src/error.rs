//! Base error type shared by the `hr-*` crates.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("coordinate is not finite: lat={lat}, lng={lng}")]
    NonFiniteCoordinate { lat: f64, lng: f64 },
}

/// Shorthand result type for `hr-core`.
pub type CoreResult<T> = Result<T, CoreError>;
