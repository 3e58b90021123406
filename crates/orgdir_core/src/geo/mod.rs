//! Geospatial primitives and filters.
//!
//! # Responsibility
//! - Great-circle distance between two coordinates (haversine).
//! - Radius and bounding-rectangle filters over in-memory candidates.
//!
//! # Invariants
//! - Distances use a spherical Earth of radius `EARTH_RADIUS_KM`.
//! - Candidates without a location never match any filter.
//! - Filters scan linearly; there is no spatial index.

mod filter;

pub use filter::{filter_by_radius, filter_by_rectangle, BoundingBox, Located, RadiusQuery};

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance in kilometres between `from` and `to`.
///
/// `a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)`,
/// `d = 2·R·asin(√a)`.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lon = to.longitude.to_radians() - from.longitude.to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points.
    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::{haversine_km, GeoPoint};

    const RED_SQUARE: GeoPoint = GeoPoint::new(55.7539, 37.6208);
    const ARBAT: GeoPoint = GeoPoint::new(55.7494, 37.5931);
    const TVERSKAYA: GeoPoint = GeoPoint::new(55.7575, 37.6136);

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(haversine_km(RED_SQUARE, RED_SQUARE), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(haversine_km(RED_SQUARE, ARBAT), haversine_km(ARBAT, RED_SQUARE));
        assert_eq!(
            haversine_km(TVERSKAYA, ARBAT),
            haversine_km(ARBAT, TVERSKAYA)
        );
    }

    #[test]
    fn known_city_distances() {
        let arbat = haversine_km(RED_SQUARE, ARBAT);
        assert!(arbat > 1.7 && arbat < 1.9, "got {arbat}");

        let tverskaya = haversine_km(RED_SQUARE, TVERSKAYA);
        assert!(tverskaya > 0.5 && tverskaya < 0.7, "got {tverskaya}");

        // Moscow to Saint Petersburg, roughly 634 km.
        let spb = haversine_km(RED_SQUARE, GeoPoint::new(59.9343, 30.3351));
        assert!((spb - 634.0).abs() < 5.0, "got {spb}");
    }

    #[test]
    fn antipodal_points_are_half_circumference_apart() {
        let distance = haversine_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0));
        assert!((distance - std::f64::consts::PI * super::EARTH_RADIUS_KM).abs() < 1e-6);
    }
}
