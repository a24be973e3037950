//! Snap tolerance configuration.

use hr_core::pixels_to_meters;

use crate::{EditError, EditResult};

/// How close, on screen, a drawn point must be to an existing vertex to
/// reuse it.
///
/// The tolerance is expressed in pixels because that is what the user sees;
/// [`tolerance_m`](Self::tolerance_m) converts it with the map zoom.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SnapSettings {
    /// Web Mercator zoom level of the editing map.
    pub zoom_level:       f64,
    pub snap_distance_px: f64,
}

impl SnapSettings {
    pub fn new(zoom_level: f64, snap_distance_px: f64) -> Self {
        Self { zoom_level, snap_distance_px }
    }

    /// Snap tolerance in metres at the configured zoom.
    pub fn tolerance_m(&self) -> f64 {
        pixels_to_meters(self.snap_distance_px, self.zoom_level)
    }

    pub fn validate(&self) -> EditResult<()> {
        if !self.zoom_level.is_finite() || self.zoom_level < 0.0 {
            return Err(EditError::InvalidSettings(format!(
                "zoom_level must be a finite, non-negative number (got {})",
                self.zoom_level
            )));
        }
        if !self.snap_distance_px.is_finite() || self.snap_distance_px < 0.0 {
            return Err(EditError::InvalidSettings(format!(
                "snap_distance_px must be a finite, non-negative number (got {})",
                self.snap_distance_px
            )));
        }
        Ok(())
    }
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self { zoom_level: 16.0, snap_distance_px: 10.0 }
    }
}
