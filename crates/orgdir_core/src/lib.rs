//! Core domain logic for the organization directory.
//! This crate is the single source of truth for directory invariants.

pub mod db;
pub mod geo;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use geo::{
    filter_by_radius, filter_by_rectangle, haversine_km, BoundingBox, GeoPoint, Located,
    RadiusQuery, EARTH_RADIUS_KM,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::activity::{
    Activity, ActivityId, ActivityNode, NewActivity, MAX_ACTIVITY_LEVEL,
};
pub use model::building::{Building, BuildingId, NewBuilding};
pub use model::organization::{
    NewOrganization, NewPhone, Organization, OrganizationId, Phone, PhoneId, DEFAULT_PHONE_KIND,
};
pub use model::validation::ValidationError;
pub use repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
pub use repo::building_repo::{BuildingRepository, SqliteBuildingRepository};
pub use repo::organization_repo::{OrganizationRepository, SqliteOrganizationRepository};
pub use repo::{RepoError, RepoResult};
pub use seed::{seed_demo_data, SeedSummary};
pub use service::activity_service::ActivityService;
pub use service::building_service::BuildingService;
pub use service::error::{DirectoryError, DirectoryResult, EntityKind};
pub use service::hierarchy::{
    resolve_descendants, resolve_descendants_within, FULL_HIERARCHY_LEVELS,
};
pub use service::organization_service::OrganizationService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
