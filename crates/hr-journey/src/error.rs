//! Journey-subsystem error type.

use thiserror::Error;

use hr_core::{CoreError, LocationId};

#[derive(Debug, Error)]
pub enum JourneyError {
    #[error("location {location} geofence has {points} distinct points; need at least 3")]
    DegenerateGeofence { location: LocationId, points: usize },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type JourneyResult<T> = Result<T, JourneyError>;
