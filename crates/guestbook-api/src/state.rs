use std::sync::Arc;

use guestbook_db::{Connector, WishStore};

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

/// Immutable per-process configuration. Connections are never stored here;
/// each request acquires and releases its own.
pub struct AppStateInner {
    /// `None` when `DATABASE_URL` was not configured.
    pub connector: Option<Arc<dyn Connector>>,
}

impl AppStateInner {
    pub fn new(connector: Option<Arc<dyn Connector>>) -> AppState {
        Arc::new(Self { connector })
    }

    pub async fn acquire(&self) -> Result<Box<dyn WishStore>, ApiError> {
        let connector = self.connector.as_ref().ok_or(ApiError::MissingDatabaseUrl)?;
        Ok(connector.acquire().await?)
    }
}
