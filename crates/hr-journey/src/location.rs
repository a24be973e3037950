//! Site locations and their geofence polygons.

use geo::{Coord, LineString, Polygon};

use hr_core::{LatLng, LocationId};

use crate::{JourneyError, JourneyResult};

/// A named area of the site (pit, crusher, dump, workshop...).
///
/// `geofence` is an ordered ring of points; closing it back to the first
/// point is optional.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub id:       LocationId,
    pub name:     String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind:     String,
    pub geofence: Vec<LatLng>,
}

impl Location {
    pub fn new(id: LocationId, name: impl Into<String>, geofence: Vec<LatLng>) -> Self {
        Self { id, name: name.into(), kind: String::new(), geofence }
    }

    /// The geofence as a `geo` polygon (x = longitude, y = latitude).
    ///
    /// # Errors
    ///
    /// [`JourneyError::DegenerateGeofence`] for fewer than three distinct
    /// points once consecutive repeats and the closing point are dropped;
    /// [`JourneyError::Core`] for NaN/infinite points.
    pub fn polygon(&self) -> JourneyResult<Polygon<f64>> {
        for p in &self.geofence {
            p.checked()?;
        }
        let mut ring = self.geofence.clone();
        ring.dedup();
        while ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(JourneyError::DegenerateGeofence { location: self.id, points: ring.len() });
        }
        let exterior: LineString<f64> = ring.into_iter().map(to_coord).collect();
        Ok(Polygon::new(exterior, vec![]))
    }
}

#[inline]
pub(crate) fn to_coord(p: LatLng) -> Coord<f64> {
    Coord { x: p.lng, y: p.lat }
}
