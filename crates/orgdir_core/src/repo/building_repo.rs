//! Building repository contracts and SQLite implementation.

use crate::model::building::{Building, BuildingId};
use crate::repo::{ensure_connection_ready, parse_uuid, RepoResult};
use rusqlite::{params, Connection, Row};

const BUILDING_SELECT_SQL: &str = "SELECT
    id,
    name,
    address,
    latitude,
    longitude
FROM buildings";

/// Data access contract for buildings.
pub trait BuildingRepository {
    fn create_building(&self, building: &Building) -> RepoResult<()>;
    fn get_building(&self, id: BuildingId) -> RepoResult<Option<Building>>;
    /// All buildings ordered by `name ASC, id ASC`.
    fn list_buildings(&self) -> RepoResult<Vec<Building>>;
}

/// SQLite-backed building repository.
pub struct SqliteBuildingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBuildingRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["buildings"])?;
        Ok(Self { conn })
    }
}

impl BuildingRepository for SqliteBuildingRepository<'_> {
    fn create_building(&self, building: &Building) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO buildings (
                id,
                name,
                address,
                latitude,
                longitude
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                building.id.to_string(),
                building.name.as_str(),
                building.address.as_str(),
                building.latitude,
                building.longitude,
            ],
        )?;
        Ok(())
    }

    fn get_building(&self, id: BuildingId) -> RepoResult<Option<Building>> {
        let sql = format!("{BUILDING_SELECT_SQL} WHERE id = ?1;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_building_row(row)?));
        }
        Ok(None)
    }

    fn list_buildings(&self) -> RepoResult<Vec<Building>> {
        let sql = format!("{BUILDING_SELECT_SQL} ORDER BY name ASC, id ASC;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_building_row(row)?);
        }
        Ok(items)
    }
}

fn parse_building_row(row: &Row<'_>) -> RepoResult<Building> {
    let id_text: String = row.get("id")?;
    Ok(Building {
        id: parse_uuid(&id_text, "buildings.id")?,
        name: row.get("name")?,
        address: row.get("address")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
    })
}
