use std::time::Duration;

use guestbook_db::connection::{DEFAULT_CLOSE_TIMEOUT, DEFAULT_CONNECT_TIMEOUT};

/// Log filter used when `RUST_LOG` is unset. `guestbook` also matches the
/// `guestbook_api` and `guestbook_db` targets.
pub const DEFAULT_LOG_FILTER: &str = "guestbook=debug,tower_http=debug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Required for every request that touches storage. Missing is not fatal
    /// at startup; requests fail with 500 instead.
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub connect_timeout: Duration,
    pub close_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let host = lookup("GUESTBOOK_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("GUESTBOOK_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()?;

        let secs = |key: &str, default: Duration| -> anyhow::Result<Duration> {
            match lookup(key) {
                Some(v) => Ok(Duration::from_secs(v.parse()?)),
                None => Ok(default),
            }
        };

        Ok(Self {
            database_url,
            host,
            port,
            connect_timeout: secs("GUESTBOOK_DB_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT)?,
            close_timeout: secs("GUESTBOOK_DB_CLOSE_TIMEOUT_SECS", DEFAULT_CLOSE_TIMEOUT)?,
        })
    }
}
