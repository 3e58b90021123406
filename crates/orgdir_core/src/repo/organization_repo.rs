//! Organization repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist organizations together with their phones and activity tags.
//! - Serve the read queries the directory needs: by id, by name fragment,
//!   by building, by activity set, and "everything with a location".
//!
//! # Invariants
//! - `create_organization` writes organization, phones and tags in one
//!   transaction; a failure leaves no partial rows.
//! - Every query returns each organization at most once, ordered by
//!   `name ASC, id ASC`.

use crate::model::activity::{Activity, ActivityId};
use crate::model::building::{Building, BuildingId};
use crate::model::organization::{NewOrganization, Organization, OrganizationId, Phone};
use crate::repo::activity_repo::parse_activity_row;
use crate::repo::{ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{
    params, params_from_iter, Connection, Params, Row, Transaction, TransactionBehavior,
};
use std::collections::BTreeSet;
use uuid::Uuid;

const ORGANIZATION_SELECT_SQL: &str = "SELECT
    o.id AS id,
    o.name AS name,
    o.description AS description,
    o.address AS address,
    o.latitude AS latitude,
    o.longitude AS longitude,
    o.building_id AS building_id,
    b.name AS building_name,
    b.address AS building_address,
    b.latitude AS building_latitude,
    b.longitude AS building_longitude
FROM organizations o
INNER JOIN buildings b ON b.id = o.building_id";

const ORGANIZATION_ORDER_SQL: &str = "ORDER BY o.name ASC, o.id ASC";

/// Data access contract for organizations.
pub trait OrganizationRepository {
    /// Persists one organization with phones and activity tags atomically.
    ///
    /// Building and activity existence is checked by the caller; the
    /// store's foreign keys are only the last line.
    fn create_organization(
        &self,
        id: OrganizationId,
        organization: &NewOrganization,
    ) -> RepoResult<Organization>;
    fn get_organization(&self, id: OrganizationId) -> RepoResult<Option<Organization>>;
    /// Case-insensitive substring match on name; wildcards match literally.
    fn search_by_name(&self, fragment: &str) -> RepoResult<Vec<Organization>>;
    fn list_by_building(&self, building_id: BuildingId) -> RepoResult<Vec<Organization>>;
    /// Organizations tagged with at least one of `activity_ids`.
    fn list_with_activities(
        &self,
        activity_ids: &BTreeSet<ActivityId>,
    ) -> RepoResult<Vec<Organization>>;
    /// Organizations with both coordinates set.
    fn list_with_location(&self) -> RepoResult<Vec<Organization>>;
}

/// SQLite-backed organization repository.
pub struct SqliteOrganizationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOrganizationRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[
                "organizations",
                "phones",
                "organization_activities",
                "buildings",
                "activities",
            ],
        )?;
        Ok(Self { conn })
    }

    fn query_organizations(&self, sql: &str, params: impl Params) -> RepoResult<Vec<Organization>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_organization_row(row)?);
        }

        for organization in &mut items {
            organization.phones = load_phones(self.conn, organization.id)?;
            organization.activities = load_activities(self.conn, organization.id)?;
        }
        Ok(items)
    }
}

impl OrganizationRepository for SqliteOrganizationRepository<'_> {
    fn create_organization(
        &self,
        id: OrganizationId,
        organization: &NewOrganization,
    ) -> RepoResult<Organization> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        tx.execute(
            "INSERT INTO organizations (
                id,
                name,
                description,
                address,
                latitude,
                longitude,
                building_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                id.to_string(),
                organization.name.as_str(),
                organization.description.as_deref(),
                organization.address.as_deref(),
                organization.latitude,
                organization.longitude,
                organization.building_id.to_string(),
            ],
        )?;

        for phone in &organization.phones {
            tx.execute(
                "INSERT INTO phones (id, number, kind, organization_id)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    Uuid::new_v4().to_string(),
                    phone.number.as_str(),
                    phone.kind.as_str(),
                    id.to_string(),
                ],
            )?;
        }

        for activity_id in &organization.activity_ids {
            tx.execute(
                "INSERT OR IGNORE INTO organization_activities (organization_id, activity_id)
                 VALUES (?1, ?2);",
                params![id.to_string(), activity_id.to_string()],
            )?;
        }

        tx.commit()?;

        self.get_organization(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("organization {id} missing right after insert"))
        })
    }

    fn get_organization(&self, id: OrganizationId) -> RepoResult<Option<Organization>> {
        let sql = format!("{ORGANIZATION_SELECT_SQL} WHERE o.id = ?1;");
        Ok(self
            .query_organizations(&sql, [id.to_string()])?
            .into_iter()
            .next())
    }

    fn search_by_name(&self, fragment: &str) -> RepoResult<Vec<Organization>> {
        let sql = format!(
            "{ORGANIZATION_SELECT_SQL} WHERE o.name LIKE ?1 ESCAPE '\\' {ORGANIZATION_ORDER_SQL};"
        );
        let pattern = format!("%{}%", escape_like(fragment));
        self.query_organizations(&sql, [pattern])
    }

    fn list_by_building(&self, building_id: BuildingId) -> RepoResult<Vec<Organization>> {
        let sql =
            format!("{ORGANIZATION_SELECT_SQL} WHERE o.building_id = ?1 {ORGANIZATION_ORDER_SQL};");
        self.query_organizations(&sql, [building_id.to_string()])
    }

    fn list_with_activities(
        &self,
        activity_ids: &BTreeSet<ActivityId>,
    ) -> RepoResult<Vec<Organization>> {
        if activity_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = (1..=activity_ids.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "{ORGANIZATION_SELECT_SQL}
             WHERE EXISTS(
                SELECT 1
                FROM organization_activities oa
                WHERE oa.organization_id = o.id
                  AND oa.activity_id IN ({placeholders})
             )
             {ORGANIZATION_ORDER_SQL};"
        );
        let bind_values = activity_ids
            .iter()
            .map(|id| Value::Text(id.to_string()))
            .collect::<Vec<_>>();
        self.query_organizations(&sql, params_from_iter(bind_values))
    }

    fn list_with_location(&self) -> RepoResult<Vec<Organization>> {
        let sql = format!(
            "{ORGANIZATION_SELECT_SQL}
             WHERE o.latitude IS NOT NULL
               AND o.longitude IS NOT NULL
             {ORGANIZATION_ORDER_SQL};"
        );
        self.query_organizations(&sql, [])
    }
}

fn load_phones(conn: &Connection, organization_id: OrganizationId) -> RepoResult<Vec<Phone>> {
    let mut stmt = conn.prepare(
        "SELECT id, number, kind, organization_id
         FROM phones
         WHERE organization_id = ?1
         ORDER BY rowid ASC;",
    )?;
    let mut rows = stmt.query([organization_id.to_string()])?;
    let mut phones = Vec::new();
    while let Some(row) = rows.next()? {
        let id_text: String = row.get("id")?;
        let owner_text: String = row.get("organization_id")?;
        phones.push(Phone {
            id: parse_uuid(&id_text, "phones.id")?,
            number: row.get("number")?,
            kind: row.get("kind")?,
            organization_id: parse_uuid(&owner_text, "phones.organization_id")?,
        });
    }
    Ok(phones)
}

fn load_activities(
    conn: &Connection,
    organization_id: OrganizationId,
) -> RepoResult<Vec<Activity>> {
    let mut stmt = conn.prepare(
        "SELECT
            a.id AS id,
            a.name AS name,
            a.description AS description,
            a.parent_id AS parent_id,
            a.level AS level
         FROM activities a
         INNER JOIN organization_activities oa ON oa.activity_id = a.id
         WHERE oa.organization_id = ?1
         ORDER BY a.level ASC, a.name ASC, a.id ASC;",
    )?;
    let mut rows = stmt.query([organization_id.to_string()])?;
    let mut activities = Vec::new();
    while let Some(row) = rows.next()? {
        activities.push(parse_activity_row(row)?);
    }
    Ok(activities)
}

fn parse_organization_row(row: &Row<'_>) -> RepoResult<Organization> {
    let id_text: String = row.get("id")?;
    let building_id_text: String = row.get("building_id")?;
    let building_id = parse_uuid(&building_id_text, "organizations.building_id")?;

    Ok(Organization {
        id: parse_uuid(&id_text, "organizations.id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        address: row.get("address")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        building_id,
        building: Building {
            id: building_id,
            name: row.get("building_name")?,
            address: row.get("building_address")?,
            latitude: row.get("building_latitude")?,
            longitude: row.get("building_longitude")?,
        },
        phones: Vec::new(),
        activities: Vec::new(),
    })
}

fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for ch in fragment.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
