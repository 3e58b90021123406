//! Shared router state.

use crate::config::ApiKey;
use crate::error::ApiError;
use orgdir_core::db::SessionFactory;
use rusqlite::Connection;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    sessions: Arc<SessionFactory>,
    api_key: Arc<ApiKey>,
}

impl AppState {
    pub fn new(sessions: SessionFactory, api_key: ApiKey) -> Self {
        Self {
            sessions: Arc::new(sessions),
            api_key: Arc::new(api_key),
        }
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Runs `work` on a blocking thread against a fresh session.
    ///
    /// The session is acquired inside the blocking task and dropped when
    /// `work` returns, on success and error alike.
    pub async fn with_session<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, ApiError> + Send + 'static,
    {
        let sessions = Arc::clone(&self.sessions);
        tokio::task::spawn_blocking(move || {
            let session = sessions.acquire()?;
            work(session.connection())
        })
        .await?
    }
}
