//! Opaque pagination cursor.
//!
//! A cursor is the keyset position `(created_at, id)` of the last row of a
//! page, serialized as `base64("<RFC 3339 timestamp>|<id>")`. Clients treat it
//! as an opaque token and echo it back to fetch the next page.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use chrono::{DateTime, SecondsFormat, Utc};

use guestbook_types::models::Wish;

const SEPARATOR: char = '|';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub created_at: DateTime<Utc>,
    pub id: i64,
}

impl Cursor {
    pub fn new(created_at: DateTime<Utc>, id: i64) -> Self {
        Self { created_at, id }
    }

    /// Microsecond precision matches `timestamptz`, so the bound is exact.
    pub fn encode(&self) -> String {
        let raw = format!(
            "{}{}{}",
            self.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            SEPARATOR,
            self.id
        );
        URL_SAFE_NO_PAD.encode(raw)
    }

    /// Parse an untrusted token. Anything malformed yields `None`.
    pub fn decode(token: &str) -> Option<Self> {
        let token = token.trim().trim_end_matches('=');
        if token.is_empty() {
            return None;
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .or_else(|_| STANDARD_NO_PAD.decode(token))
            .ok()?;
        let raw = String::from_utf8(bytes).ok()?;

        let (ts, id) = raw.split_once(SEPARATOR)?;
        let id = id.parse::<i64>().ok()?;
        let created_at = DateTime::parse_from_rfc3339(ts).ok()?.with_timezone(&Utc);

        Some(Self { created_at, id })
    }

    /// RFC 3339 rendering of the timestamp half, in UTC.
    pub fn created_at_iso(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

impl From<&Wish> for Cursor {
    fn from(wish: &Wish) -> Self {
        Self::new(wish.created_at, wish.id)
    }
}

/// Cursor for the page after `rows`, or `None` when there is no last row.
pub fn encode_after(rows: &[Wish]) -> Option<String> {
    rows.last().map(|row| Cursor::from(row).encode())
}
