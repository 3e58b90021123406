//! Building use-case service.

use crate::model::building::{Building, BuildingId, NewBuilding};
use crate::repo::building_repo::BuildingRepository;
use crate::service::error::{DirectoryError, DirectoryResult, EntityKind};
use log::info;

/// Building service facade.
pub struct BuildingService<R: BuildingRepository> {
    repo: R,
}

impl<R: BuildingRepository> BuildingService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and persists one building.
    pub fn create_building(&self, input: NewBuilding) -> DirectoryResult<Building> {
        let building = input.normalize()?.into_building();
        self.repo.create_building(&building)?;
        info!(
            "event=building_created module=service status=ok building_id={}",
            building.id
        );
        Ok(building)
    }

    pub fn get_building(&self, id: BuildingId) -> DirectoryResult<Building> {
        self.repo
            .get_building(id)?
            .ok_or(DirectoryError::not_found(EntityKind::Building, id))
    }

    pub fn list_buildings(&self) -> DirectoryResult<Vec<Building>> {
        self.repo.list_buildings().map_err(Into::into)
    }
}
