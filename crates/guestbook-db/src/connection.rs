use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tokio::task::JoinHandle;
use tokio_postgres::config::SslMode;
use tokio_postgres::{Client, Config, NoTls};
use tracing::{debug, error, warn};

use crate::{Connector, DbError, WishStore, migrations};

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens one PostgreSQL connection per request.
///
/// The connection string is parsed once; nothing else is shared between
/// requests.
#[derive(Clone)]
pub struct PgConnector {
    config: Arc<Config>,
    close_timeout: Duration,
}

impl PgConnector {
    pub fn new(url: &str, connect_timeout: Duration, close_timeout: Duration) -> Result<Self, DbError> {
        let mut config = url
            .parse::<Config>()
            .map_err(|e| DbError::Config(e.to_string()))?;
        config.connect_timeout(connect_timeout);

        Ok(Self { config: Arc::new(config), close_timeout })
    }

    pub async fn connect(&self) -> Result<PgStore, DbError> {
        let config = self.config.as_ref();
        let connect_timeout = config.get_connect_timeout().copied().unwrap_or(DEFAULT_CONNECT_TIMEOUT);

        let (client, connection) = tokio::time::timeout(connect_timeout, open(config))
            .await
            .map_err(|_| DbError::ConnectTimeout)??;

        let mut store = PgStore {
            client: Some(client),
            connection: Some(connection),
            close_timeout: self.close_timeout,
        };

        if let Err(e) = migrations::run(store.client()?).await {
            store.shutdown().await;
            return Err(e);
        }

        Ok(store)
    }
}

#[async_trait]
impl Connector for PgConnector {
    async fn acquire(&self) -> Result<Box<dyn WishStore>, DbError> {
        Ok(Box::new(self.connect().await?))
    }
}

async fn open(config: &Config) -> Result<(Client, JoinHandle<()>), DbError> {
    match config.get_ssl_mode() {
        SslMode::Disable => open_plain(config).await,
        SslMode::Prefer => match open_tls(config).await {
            Ok(opened) => Ok(opened),
            Err(e) => {
                warn!(error = %e, "Postgres TLS handshake failed, retrying without TLS");
                open_plain(config).await
            }
        },
        _ => open_tls(config).await,
    }
}

async fn open_tls(config: &Config) -> Result<(Client, JoinHandle<()>), DbError> {
    let connector = TlsConnector::builder().build()?;
    let (client, connection) = config.connect(MakeTlsConnector::new(connector)).await?;
    let handle = tokio::spawn(async move {
        if let Err(e) = connection.await {
            error!(error = %e, "Postgres connection error");
        }
    });
    Ok((client, handle))
}

async fn open_plain(config: &Config) -> Result<(Client, JoinHandle<()>), DbError> {
    let (client, connection) = config.connect(NoTls).await?;
    let handle = tokio::spawn(async move {
        if let Err(e) = connection.await {
            error!(error = %e, "Postgres connection error");
        }
    });
    Ok((client, handle))
}

/// A single request-scoped connection.
pub struct PgStore {
    client: Option<Client>,
    connection: Option<JoinHandle<()>>,
    close_timeout: Duration,
}

impl PgStore {
    pub(crate) fn client(&self) -> Result<&Client, DbError> {
        self.client.as_ref().ok_or(DbError::Closed)
    }

    pub(crate) async fn shutdown(&mut self) {
        // Dropping the client sends Terminate; the connection task then ends.
        drop(self.client.take());

        let Some(mut handle) = self.connection.take() else {
            return;
        };
        match tokio::time::timeout(self.close_timeout, &mut handle).await {
            Ok(Ok(())) => debug!("Database connection closed"),
            Ok(Err(e)) => warn!(error = %e, "Database connection task failed"),
            Err(_) => {
                warn!(
                    "Database connection did not close within {:?}, aborting",
                    self.close_timeout
                );
                handle.abort();
            }
        }
    }
}

impl Drop for PgStore {
    fn drop(&mut self) {
        if let Some(handle) = self.connection.take() {
            handle.abort();
        }
    }
}
