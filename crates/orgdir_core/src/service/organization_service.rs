//! Organization use-case service.
//!
//! # Responsibility
//! - Create organizations after checking building and activity references.
//! - Answer directory queries: by id, name, building, activity, activity
//!   hierarchy, radius and rectangle.
//!
//! # Invariants
//! - Referenced building and activities are checked before any write, so a
//!   rejected create leaves no rows behind.
//! - Hierarchy and geo queries return each organization at most once.

use crate::geo::{filter_by_radius, filter_by_rectangle, BoundingBox, RadiusQuery};
use crate::model::activity::ActivityId;
use crate::model::building::BuildingId;
use crate::model::organization::{NewOrganization, Organization, OrganizationId};
use crate::repo::activity_repo::ActivityRepository;
use crate::repo::building_repo::BuildingRepository;
use crate::repo::organization_repo::OrganizationRepository;
use crate::service::error::{DirectoryError, DirectoryResult, EntityKind};
use crate::service::hierarchy::{resolve_descendants_within, FULL_HIERARCHY_LEVELS};
use log::info;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Organization service facade.
pub struct OrganizationService<O, A, B>
where
    O: OrganizationRepository,
    A: ActivityRepository,
    B: BuildingRepository,
{
    organizations: O,
    activities: A,
    buildings: B,
}

impl<O, A, B> OrganizationService<O, A, B>
where
    O: OrganizationRepository,
    A: ActivityRepository,
    B: BuildingRepository,
{
    pub fn new(organizations: O, activities: A, buildings: B) -> Self {
        Self {
            organizations,
            activities,
            buildings,
        }
    }

    /// Creates one organization with its phones and activity tags.
    ///
    /// # Errors
    /// - `Validation` for blank name/phone numbers or out-of-range coordinates.
    /// - `NotFound(Building)` / `NotFound(Activity)` for dangling references.
    pub fn create_organization(&self, input: NewOrganization) -> DirectoryResult<Organization> {
        let input = input.normalize()?;
        self.ensure_building_exists(input.building_id)?;
        for activity_id in &input.activity_ids {
            self.ensure_activity_exists(*activity_id)?;
        }

        let organization = self
            .organizations
            .create_organization(Uuid::new_v4(), &input)?;
        info!(
            "event=organization_created module=service status=ok organization_id={} phones={} activities={}",
            organization.id,
            organization.phones.len(),
            organization.activities.len()
        );
        Ok(organization)
    }

    pub fn get_organization(&self, id: OrganizationId) -> DirectoryResult<Organization> {
        self.organizations
            .get_organization(id)?
            .ok_or(DirectoryError::not_found(EntityKind::Organization, id))
    }

    /// Case-insensitive substring search on organization name.
    pub fn search_by_name(&self, name: &str) -> DirectoryResult<Vec<Organization>> {
        let fragment = name.trim();
        if fragment.is_empty() {
            return Err(DirectoryError::validation("name", "must not be blank"));
        }
        self.organizations
            .search_by_name(fragment)
            .map_err(Into::into)
    }

    pub fn list_in_building(&self, building_id: BuildingId) -> DirectoryResult<Vec<Organization>> {
        self.ensure_building_exists(building_id)?;
        self.organizations
            .list_by_building(building_id)
            .map_err(Into::into)
    }

    /// Organizations tagged with exactly this activity (no descendants).
    pub fn list_by_activity(&self, activity_id: ActivityId) -> DirectoryResult<Vec<Organization>> {
        self.ensure_activity_exists(activity_id)?;
        self.organizations
            .list_with_activities(&BTreeSet::from([activity_id]))
            .map_err(Into::into)
    }

    /// Organizations tagged with `activity_id` or any of its descendants.
    pub fn list_organizations_in_hierarchy(
        &self,
        activity_id: ActivityId,
    ) -> DirectoryResult<Vec<Organization>> {
        self.list_organizations_in_hierarchy_within(activity_id, FULL_HIERARCHY_LEVELS)
    }

    /// Same as `list_organizations_in_hierarchy`, expanding only `max_levels`
    /// levels counting `activity_id` as the first.
    pub fn list_organizations_in_hierarchy_within(
        &self,
        activity_id: ActivityId,
        max_levels: u8,
    ) -> DirectoryResult<Vec<Organization>> {
        let activity_ids = resolve_descendants_within(&self.activities, activity_id, max_levels)?;
        self.organizations
            .list_with_activities(&activity_ids)
            .map_err(Into::into)
    }

    /// Organizations within `query.radius_km()` of the query center.
    pub fn search_by_radius(&self, query: &RadiusQuery) -> DirectoryResult<Vec<Organization>> {
        let candidates = self.organizations.list_with_location()?;
        Ok(filter_by_radius(query, candidates))
    }

    /// Organizations inside the bounding rectangle.
    pub fn search_by_rectangle(&self, bounds: &BoundingBox) -> DirectoryResult<Vec<Organization>> {
        let candidates = self.organizations.list_with_location()?;
        Ok(filter_by_rectangle(bounds, candidates))
    }

    fn ensure_building_exists(&self, building_id: BuildingId) -> DirectoryResult<()> {
        self.buildings
            .get_building(building_id)?
            .ok_or(DirectoryError::not_found(EntityKind::Building, building_id))?;
        Ok(())
    }

    fn ensure_activity_exists(&self, activity_id: ActivityId) -> DirectoryResult<()> {
        self.activities
            .get_activity(activity_id)?
            .ok_or(DirectoryError::not_found(EntityKind::Activity, activity_id))?;
        Ok(())
    }
}
