pub mod connection;
pub mod cursor;
pub mod migrations;
pub mod models;
pub mod pagination;
pub mod queries;

use async_trait::async_trait;
use thiserror::Error;

use guestbook_types::models::{NewWish, Wish};

pub use connection::{PgConnector, PgStore};
pub use cursor::Cursor;
pub use models::HealthStats;
pub use pagination::{Page, clamp_limit, fetch_page, parse_cursor};

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Invalid database connection string: {0}")]
    Config(String),

    #[error(transparent)]
    Postgres(#[from] tokio_postgres::Error),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("Timed out connecting to the database")]
    ConnectTimeout,

    #[error("Database connection already closed")]
    Closed,
}

/// One request's view of storage. Implementations hold a single connection
/// that lives until [`WishStore::close`].
#[async_trait]
pub trait WishStore: Send + Sync {
    async fn insert_wish(&self, wish: &NewWish) -> Result<Wish, DbError>;

    /// Up to `limit` rows ordered `(created_at DESC, id DESC)`, strictly after
    /// `cursor` in that order when one is given.
    async fn list_wishes(&self, limit: u32, cursor: Option<Cursor>) -> Result<Vec<Wish>, DbError>;

    async fn health(&self) -> Result<HealthStats, DbError>;

    /// Release the underlying connection. Later calls fail with
    /// [`DbError::Closed`].
    async fn close(&mut self);
}

/// Opens a fresh, schema-ready [`WishStore`] per request.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn acquire(&self) -> Result<Box<dyn WishStore>, DbError>;
}
