//! Organization and phone models.
//!
//! # Invariants
//! - An organization references exactly one building.
//! - Phones are owned by exactly one organization and die with it.
//! - Organization coordinates are independent of the building's.

use crate::geo::GeoPoint;
use crate::model::activity::{Activity, ActivityId};
use crate::model::building::{Building, BuildingId};
use crate::model::validation::{
    check_latitude, check_longitude, optional_text, require_text, ValidationError,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type OrganizationId = Uuid;
pub type PhoneId = Uuid;

/// Phone type used when the caller does not supply one.
pub const DEFAULT_PHONE_KIND: &str = "mobile";

/// Phone number owned by one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    pub id: PhoneId,
    pub number: String,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: String,
    pub organization_id: OrganizationId,
}

/// Organization read model with building, phones and activity tags resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub building_id: BuildingId,
    pub building: Building,
    pub phones: Vec<Phone>,
    pub activities: Vec<Activity>,
}

impl Organization {
    /// Own location; `None` unless both coordinates are set.
    pub fn location(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)),
            _ => None,
        }
    }

    pub fn has_activity(&self, activity_id: ActivityId) -> bool {
        self.activities
            .iter()
            .any(|activity| activity.id == activity_id)
    }
}

/// Create input for one phone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPhone {
    pub number: String,
    #[serde(rename = "type", default = "default_phone_kind")]
    pub kind: String,
}

impl NewPhone {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            kind: default_phone_kind(),
        }
    }
}

fn default_phone_kind() -> String {
    DEFAULT_PHONE_KIND.to_string()
}

/// Create input for an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrganization {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    pub building_id: BuildingId,
    #[serde(default)]
    pub phones: Vec<NewPhone>,
    #[serde(default)]
    pub activity_ids: Vec<ActivityId>,
}

impl NewOrganization {
    pub fn new(name: impl Into<String>, building_id: BuildingId) -> Self {
        Self {
            name: name.into(),
            description: None,
            address: None,
            latitude: None,
            longitude: None,
            building_id,
            phones: Vec::new(),
            activity_ids: Vec::new(),
        }
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Trims text, checks coordinates and drops repeated activity ids.
    pub fn normalize(self) -> Result<Self, ValidationError> {
        if let Some(latitude) = self.latitude {
            check_latitude("latitude", latitude)?;
        }
        if let Some(longitude) = self.longitude {
            check_longitude("longitude", longitude)?;
        }

        let phones = self
            .phones
            .into_iter()
            .enumerate()
            .map(|(index, phone)| {
                let number = require_text(&format!("phones[{index}].number"), phone.number)?;
                let kind = optional_text(Some(phone.kind)).unwrap_or_else(default_phone_kind);
                Ok(NewPhone { number, kind })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        let mut activity_ids = Vec::with_capacity(self.activity_ids.len());
        for id in self.activity_ids {
            if !activity_ids.contains(&id) {
                activity_ids.push(id);
            }
        }

        Ok(Self {
            name: require_text("name", self.name)?,
            description: optional_text(self.description),
            address: optional_text(self.address),
            latitude: self.latitude,
            longitude: self.longitude,
            building_id: self.building_id,
            phones,
            activity_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{NewOrganization, NewPhone, DEFAULT_PHONE_KIND};
    use uuid::Uuid;

    #[test]
    fn normalize_defaults_blank_phone_kind_and_dedupes_activities() {
        let activity = Uuid::new_v4();
        let mut input = NewOrganization::new("Horns & Hooves", Uuid::new_v4());
        input.phones = vec![NewPhone {
            number: " 2-222-222 ".to_string(),
            kind: " ".to_string(),
        }];
        input.activity_ids = vec![activity, activity];

        let normalized = input.normalize().unwrap();
        assert_eq!(normalized.phones[0].number, "2-222-222");
        assert_eq!(normalized.phones[0].kind, DEFAULT_PHONE_KIND);
        assert_eq!(normalized.activity_ids, vec![activity]);
    }

    #[test]
    fn normalize_reports_phone_field_path() {
        let mut input = NewOrganization::new("Horns & Hooves", Uuid::new_v4());
        input.phones = vec![NewPhone::new("1"), NewPhone::new("  ")];
        assert_eq!(input.normalize().unwrap_err().field, "phones[1].number");
    }

    #[test]
    fn normalize_rejects_out_of_range_latitude() {
        let input = NewOrganization::new("Far north", Uuid::new_v4()).with_location(95.0, 10.0);
        assert_eq!(input.normalize().unwrap_err().field, "latitude");
    }

    #[test]
    fn phone_kind_defaults_when_missing_from_json() {
        let phone: NewPhone = serde_json::from_str(r#"{"number": "3-333-333"}"#).unwrap();
        assert_eq!(phone.kind, DEFAULT_PHONE_KIND);
    }
}
