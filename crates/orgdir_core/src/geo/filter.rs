use super::{haversine_km, GeoPoint};
use crate::model::building::Building;
use crate::model::organization::Organization;
use crate::model::validation::{check_latitude, check_longitude, ValidationError};

/// Anything that may have a position on the map.
pub trait Located {
    fn location(&self) -> Option<GeoPoint>;
}

impl Located for GeoPoint {
    fn location(&self) -> Option<GeoPoint> {
        Some(*self)
    }
}

impl Located for Organization {
    fn location(&self) -> Option<GeoPoint> {
        Organization::location(self)
    }
}

impl Located for Building {
    fn location(&self) -> Option<GeoPoint> {
        Some(Building::location(self))
    }
}

impl<T: Located> Located for &T {
    fn location(&self) -> Option<GeoPoint> {
        (**self).location()
    }
}

/// Validated circle: center plus strictly positive radius in km.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusQuery {
    center: GeoPoint,
    radius_km: f64,
}

impl RadiusQuery {
    pub fn new(center: GeoPoint, radius_km: f64) -> Result<Self, ValidationError> {
        check_latitude("latitude", center.latitude)?;
        check_longitude("longitude", center.longitude)?;
        if !(radius_km > 0.0 && radius_km.is_finite()) {
            return Err(ValidationError::new(
                "radius_km",
                format!("radius must be a positive number of kilometres, got {radius_km}"),
            ));
        }
        Ok(Self { center, radius_km })
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        haversine_km(self.center, point) <= self.radius_km
    }
}

/// Validated axis-aligned lat/lon rectangle, inclusive on every edge.
///
/// Does not wrap across the ±180° meridian: `min_lon` must not exceed
/// `max_lon`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
}

impl BoundingBox {
    pub fn new(
        min_lat: f64,
        max_lat: f64,
        min_lon: f64,
        max_lon: f64,
    ) -> Result<Self, ValidationError> {
        check_latitude("min_lat", min_lat)?;
        check_latitude("max_lat", max_lat)?;
        check_longitude("min_lon", min_lon)?;
        check_longitude("max_lon", max_lon)?;
        if min_lat > max_lat {
            return Err(ValidationError::new(
                "min_lat",
                format!("min_lat {min_lat} is greater than max_lat {max_lat}"),
            ));
        }
        if min_lon > max_lon {
            return Err(ValidationError::new(
                "min_lon",
                format!("min_lon {min_lon} is greater than max_lon {max_lon}"),
            ));
        }
        Ok(Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        })
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.latitude)
            && (self.min_lon..=self.max_lon).contains(&point.longitude)
    }
}

/// Keeps candidates whose location lies within the query circle.
pub fn filter_by_radius<T: Located>(
    query: &RadiusQuery,
    candidates: impl IntoIterator<Item = T>,
) -> Vec<T> {
    candidates
        .into_iter()
        .filter(|candidate| {
            candidate
                .location()
                .is_some_and(|point| query.contains(point))
        })
        .collect()
}

/// Keeps candidates whose location lies inside the rectangle.
pub fn filter_by_rectangle<T: Located>(
    bounds: &BoundingBox,
    candidates: impl IntoIterator<Item = T>,
) -> Vec<T> {
    candidates
        .into_iter()
        .filter(|candidate| {
            candidate
                .location()
                .is_some_and(|point| bounds.contains(point))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_by_radius, filter_by_rectangle, BoundingBox, Located, RadiusQuery};
    use crate::geo::GeoPoint;

    #[derive(Debug, Clone, PartialEq)]
    struct Pin {
        name: &'static str,
        at: Option<GeoPoint>,
    }

    impl Located for Pin {
        fn location(&self) -> Option<GeoPoint> {
            self.at
        }
    }

    fn pin(name: &'static str, latitude: f64, longitude: f64) -> Pin {
        Pin {
            name,
            at: Some(GeoPoint::new(latitude, longitude)),
        }
    }

    fn names(pins: &[Pin]) -> Vec<&'static str> {
        pins.iter().map(|pin| pin.name).collect()
    }

    #[test]
    fn radius_includes_center_and_excludes_distant_points() {
        let query = RadiusQuery::new(GeoPoint::new(55.7539, 37.6208), 1.0).unwrap();
        let candidates = vec![
            pin("red_square", 55.7539, 37.6208),
            pin("arbat", 55.7494, 37.5931),
            Pin {
                name: "nowhere",
                at: None,
            },
        ];
        assert_eq!(names(&filter_by_radius(&query, candidates)), ["red_square"]);
    }

    #[test]
    fn tiny_radius_still_matches_exact_point() {
        let query = RadiusQuery::new(GeoPoint::new(10.0, 20.0), 0.001).unwrap();
        let matched = filter_by_radius(&query, [pin("here", 10.0, 20.0)]);
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn radius_must_be_positive() {
        let center = GeoPoint::new(0.0, 0.0);
        assert_eq!(RadiusQuery::new(center, 0.0).unwrap_err().field, "radius_km");
        assert_eq!(RadiusQuery::new(center, -1.0).unwrap_err().field, "radius_km");
        assert_eq!(
            RadiusQuery::new(GeoPoint::new(-91.0, 0.0), 1.0)
                .unwrap_err()
                .field,
            "latitude"
        );
    }

    #[test]
    fn origin_is_a_real_location() {
        let query = RadiusQuery::new(GeoPoint::new(0.0, 0.0), 1.0).unwrap();
        assert_eq!(filter_by_radius(&query, [pin("null_island", 0.0, 0.0)]).len(), 1);
    }

    #[test]
    fn rectangle_is_inclusive_and_skips_unlocated() {
        let bounds = BoundingBox::new(55.75, 55.76, 37.60, 37.62).unwrap();
        let candidates = vec![
            pin("inside", 55.7558, 37.6176),
            pin("edge", 55.75, 37.62),
            pin("outside", 55.70, 37.50),
            Pin {
                name: "unlocated",
                at: None,
            },
        ];
        assert_eq!(
            names(&filter_by_rectangle(&bounds, candidates)),
            ["inside", "edge"]
        );
    }

    #[test]
    fn rectangle_rejects_inverted_bounds() {
        assert_eq!(
            BoundingBox::new(56.0, 55.0, 37.0, 38.0).unwrap_err().field,
            "min_lat"
        );
        // No seam wraparound: 170..-170 is not accepted as a box.
        assert_eq!(
            BoundingBox::new(0.0, 1.0, 170.0, -170.0).unwrap_err().field,
            "min_lon"
        );
    }

    #[test]
    fn filters_work_over_borrowed_candidates() {
        let owned = vec![pin("a", 1.0, 1.0), pin("b", 50.0, 50.0)];
        let bounds = BoundingBox::new(0.0, 2.0, 0.0, 2.0).unwrap();
        let matched = filter_by_rectangle(&bounds, owned.iter());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "a");
    }
}
