//! Request bodies, query strings and response envelopes of the HTTP API.

use orgdir_core::{
    Activity, BoundingBox, Building, GeoPoint, Organization, RadiusQuery, ValidationError,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_RADIUS_KM: f64 = 10.0;

fn default_radius_km() -> f64 {
    DEFAULT_RADIUS_KM
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeoRadiusRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
}

impl GeoRadiusRequest {
    pub fn into_query(self) -> Result<RadiusQuery, ValidationError> {
        RadiusQuery::new(GeoPoint::new(self.latitude, self.longitude), self.radius_km)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RectangleRequest {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl RectangleRequest {
    pub fn into_bounds(self) -> Result<BoundingBox, ValidationError> {
        BoundingBox::new(self.min_lat, self.max_lat, self.min_lon, self.max_lon)
    }
}

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct HierarchyQuery {
    /// Levels to expand, counting the requested activity as the first.
    pub level: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct OrganizationsResponse {
    pub organizations: Vec<Organization>,
    pub total: usize,
}

impl From<Vec<Organization>> for OrganizationsResponse {
    fn from(organizations: Vec<Organization>) -> Self {
        Self {
            total: organizations.len(),
            organizations,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BuildingsResponse {
    pub buildings: Vec<Building>,
    pub total: usize,
}

impl From<Vec<Building>> for BuildingsResponse {
    fn from(buildings: Vec<Building>) -> Self {
        Self {
            total: buildings.len(),
            buildings,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActivitiesResponse {
    pub activities: Vec<Activity>,
    pub total: usize,
}

impl From<Vec<Activity>> for ActivitiesResponse {
    fn from(activities: Vec<Activity>) -> Self {
        Self {
            total: activities.len(),
            activities,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[cfg(test)]
mod tests {
    use super::{GeoRadiusRequest, DEFAULT_RADIUS_KM};

    #[test]
    fn radius_defaults_when_omitted() {
        let request: GeoRadiusRequest =
            serde_json::from_str(r#"{"latitude": 55.75, "longitude": 37.62}"#).unwrap();
        assert_eq!(request.radius_km, DEFAULT_RADIUS_KM);
        assert!(request.into_query().is_ok());
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        let request: GeoRadiusRequest =
            serde_json::from_str(r#"{"latitude": 55.75, "longitude": 37.62, "radius_km": 0}"#)
                .unwrap();
        assert_eq!(request.into_query().unwrap_err().field, "radius_km");
    }
}
