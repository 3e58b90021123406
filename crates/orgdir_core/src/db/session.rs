//! Per-request database sessions.
//!
//! A `Session` owns one migrated connection for exactly one unit of work and
//! releases it when dropped, so early returns and errors release it too.

use super::open::open_db;
use super::DbResult;
use log::debug;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Instant;
use uuid::Uuid;

/// Produces sessions against one database file.
///
/// Holds only the database location; no connection outlives its session.
#[derive(Debug, Clone)]
pub struct SessionFactory {
    db_path: PathBuf,
}

impl SessionFactory {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Opens a fresh connection for the caller's exclusive use.
    pub fn acquire(&self) -> DbResult<Session> {
        let conn = open_db(&self.db_path)?;
        let session = Session {
            id: Uuid::new_v4(),
            conn,
            acquired_at: Instant::now(),
        };
        debug!(
            "event=session_acquire module=db status=ok session_id={}",
            session.id
        );
        Ok(session)
    }
}

/// Scoped database session. Dropping it closes the connection.
pub struct Session {
    id: Uuid,
    conn: Connection,
    acquired_at: Instant,
}

impl Session {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!(
            "event=session_release module=db status=ok session_id={} held_ms={}",
            self.id,
            self.acquired_at.elapsed().as_millis()
        );
    }
}
