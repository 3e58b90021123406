//! Building domain model.

use crate::geo::GeoPoint;
use crate::model::validation::{check_latitude, check_longitude, require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type BuildingId = Uuid;

/// A physical building that houses zero or more organizations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub name: String,
    pub address: String,
    /// Degrees in `[-90, 90]`.
    pub latitude: f64,
    /// Degrees in `[-180, 180]`.
    pub longitude: f64,
}

impl Building {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Create input for a building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBuilding {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewBuilding {
    /// Trims text fields and checks coordinate ranges.
    pub fn normalize(self) -> Result<Self, ValidationError> {
        check_latitude("latitude", self.latitude)?;
        check_longitude("longitude", self.longitude)?;
        Ok(Self {
            name: require_text("name", self.name)?,
            address: require_text("address", self.address)?,
            latitude: self.latitude,
            longitude: self.longitude,
        })
    }

    /// Materializes the input into a record with a fresh id.
    pub fn into_building(self) -> Building {
        Building {
            id: Uuid::new_v4(),
            name: self.name,
            address: self.address,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NewBuilding;

    fn input(latitude: f64, longitude: f64) -> NewBuilding {
        NewBuilding {
            name: " Red Square Mall ".to_string(),
            address: "Red Square 1".to_string(),
            latitude,
            longitude,
        }
    }

    #[test]
    fn normalize_trims_name() {
        let building = input(55.7539, 37.6208).normalize().unwrap();
        assert_eq!(building.name, "Red Square Mall");
    }

    #[test]
    fn normalize_rejects_out_of_range_coordinates() {
        assert_eq!(input(91.0, 0.0).normalize().unwrap_err().field, "latitude");
        assert_eq!(input(0.0, -181.0).normalize().unwrap_err().field, "longitude");
    }
}
