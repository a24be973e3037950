//! Geographic coordinate type and the geometry primitives the route engine
//! is built on.
//!
//! All functions are pure.  Distances are great-circle (haversine) metres on
//! a spherical Earth, which is well inside the error budget of a mine site a
//! few kilometres across.

use crate::{CoreError, CoreResult};

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Ground resolution of a Web Mercator tile pyramid at zoom 0, metres/pixel
/// at the equator.
pub const MERCATOR_M_PER_PX_Z0: f64 = 156_543.033_92;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `true` if both components are finite numbers.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// `self` if both components are finite.
    ///
    /// # Errors
    ///
    /// [`CoreError::NonFiniteCoordinate`] otherwise.
    pub fn checked(self) -> CoreResult<Self> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(CoreError::NonFiniteCoordinate { lat: self.lat, lng: self.lng })
        }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: LatLng) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lng * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Initial bearing from `self` towards `other`, degrees clockwise from
    /// true north in `[0, 360)`.
    pub fn bearing_to(self, other: LatLng) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let y = d_lng.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();
        y.atan2(x).to_degrees().rem_euclid(360.0)
    }

    /// The point reached by travelling `distance_m` metres from `self` along
    /// the great circle with initial bearing `bearing_deg`.
    pub fn project(self, bearing_deg: f64, distance_m: f64) -> LatLng {
        let delta = distance_m / EARTH_RADIUS_M;
        let theta = bearing_deg.to_radians();
        let lat1 = self.lat.to_radians();
        let lng1 = self.lng.to_radians();

        let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
        let lng2 = lng1
            + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

        // Normalise longitude to [-180, 180).
        let lng2 = (lng2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
        LatLng::new(lat2.to_degrees(), lng2)
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

// ── Map scale ─────────────────────────────────────────────────────────────────

/// Approximate metres covered by one screen pixel at `zoom`.
///
/// Uses the equatorial Web Mercator scale without the `cos(lat)` factor, so
/// it over-estimates slightly away from the equator.  Snap tolerances only
/// need to be roughly right.
#[inline]
pub fn meters_per_pixel(zoom: f64) -> f64 {
    MERCATOR_M_PER_PX_Z0 / 2f64.powf(zoom)
}

#[inline]
pub fn pixels_to_meters(pixels: f64, zoom: f64) -> f64 {
    pixels * meters_per_pixel(zoom)
}

#[inline]
pub fn meters_to_pixels(meters: f64, zoom: f64) -> f64 {
    meters / meters_per_pixel(zoom)
}

/// Sum of great-circle distances between consecutive points.  Zero for
/// fewer than two points.
pub fn polyline_length_m(points: &[LatLng]) -> f64 {
    points.windows(2).map(|w| w[0].distance_m(w[1])).sum()
}
