//! Activity repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Listing order is deterministic: `level ASC, name ASC, id ASC`.
//! - Persisted levels outside `1..=MAX_ACTIVITY_LEVEL` are reported as
//!   invalid data.

use crate::model::activity::{Activity, ActivityId, MAX_ACTIVITY_LEVEL};
use crate::repo::{ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const ACTIVITY_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    parent_id,
    level
FROM activities";

/// Data access contract for the activity taxonomy.
pub trait ActivityRepository {
    /// Persists one activity. Parent existence is checked by the caller.
    fn create_activity(&self, activity: &Activity) -> RepoResult<()>;
    fn get_activity(&self, id: ActivityId) -> RepoResult<Option<Activity>>;
    /// Direct children of `parent_id` only.
    fn get_children(&self, parent_id: ActivityId) -> RepoResult<Vec<Activity>>;
    fn list_activities(&self) -> RepoResult<Vec<Activity>>;
}

/// SQLite-backed activity repository.
pub struct SqliteActivityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteActivityRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["activities"])?;
        Ok(Self { conn })
    }
}

impl ActivityRepository for SqliteActivityRepository<'_> {
    fn create_activity(&self, activity: &Activity) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO activities (
                id,
                name,
                description,
                parent_id,
                level
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                activity.id.to_string(),
                activity.name.as_str(),
                activity.description.as_deref(),
                activity.parent_id.map(|value| value.to_string()),
                i64::from(activity.level),
            ],
        )?;
        Ok(())
    }

    fn get_activity(&self, id: ActivityId) -> RepoResult<Option<Activity>> {
        let sql = format!("{ACTIVITY_SELECT_SQL} WHERE id = ?1;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_activity_row(row)?));
        }
        Ok(None)
    }

    fn get_children(&self, parent_id: ActivityId) -> RepoResult<Vec<Activity>> {
        let sql = format!("{ACTIVITY_SELECT_SQL} WHERE parent_id = ?1 ORDER BY name ASC, id ASC;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([parent_id.to_string()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_activity_row(row)?);
        }
        Ok(items)
    }

    fn list_activities(&self) -> RepoResult<Vec<Activity>> {
        let sql = format!("{ACTIVITY_SELECT_SQL} ORDER BY level ASC, name ASC, id ASC;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_activity_row(row)?);
        }
        Ok(items)
    }
}

pub(crate) fn parse_activity_row(row: &Row<'_>) -> RepoResult<Activity> {
    let id_text: String = row.get("id")?;
    let parent_id = row
        .get::<_, Option<String>>("parent_id")?
        .map(|value| parse_uuid(&value, "activities.parent_id"))
        .transpose()?;

    let raw_level: i64 = row.get("level")?;
    let level = u8::try_from(raw_level)
        .ok()
        .filter(|level| (1..=MAX_ACTIVITY_LEVEL).contains(level))
        .ok_or_else(|| {
            RepoError::InvalidData(format!("invalid level `{raw_level}` in activities.level"))
        })?;

    Ok(Activity {
        id: parse_uuid(&id_text, "activities.id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        parent_id,
        level,
    })
}
