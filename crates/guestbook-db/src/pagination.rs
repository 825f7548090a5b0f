use std::num::IntErrorKind;

use tracing::debug;

use guestbook_types::models::Wish;

use crate::cursor::{self, Cursor};
use crate::{DbError, WishStore};

pub const DEFAULT_LIMIT: u32 = 30;
pub const MIN_LIMIT: u32 = 1;
pub const MAX_LIMIT: u32 = 200;

/// Normalize the `limit` query parameter. Missing or non-numeric values fall
/// back to the default; numbers outside `[1, 200]` are clamped.
pub fn clamp_limit(raw: Option<&str>) -> u32 {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return DEFAULT_LIMIT;
    };

    match raw.parse::<i64>() {
        Ok(n) => n.clamp(MIN_LIMIT as i64, MAX_LIMIT as i64) as u32,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => MAX_LIMIT,
            IntErrorKind::NegOverflow => MIN_LIMIT,
            _ => DEFAULT_LIMIT,
        },
    }
}

/// Decode a client-supplied cursor. A bad token means "start from the top".
pub fn parse_cursor(token: Option<&str>) -> Option<Cursor> {
    let token = token?;
    match Cursor::decode(token) {
        Some(cursor) => {
            debug!("Paging before {} #{}", cursor.created_at_iso(), cursor.id);
            Some(cursor)
        }
        None => {
            if !token.is_empty() {
                debug!("Ignoring malformed cursor {:?}", token);
            }
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub wishes: Vec<Wish>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl Page {
    /// Build a page from rows already ordered newest first.
    ///
    /// `has_more` only looks at whether the page came back full, so a result
    /// set that ends exactly on a page boundary reports one extra, empty page.
    pub fn from_rows(wishes: Vec<Wish>, limit: u32) -> Self {
        let has_more = wishes.len() == limit as usize;
        let next_cursor = cursor::encode_after(&wishes);
        Self { wishes, next_cursor, has_more }
    }
}

/// Fetch one keyset page: rows strictly older than `cursor` under
/// `(created_at DESC, id DESC)`, at most `limit` of them.
pub async fn fetch_page(
    store: &dyn WishStore,
    limit: u32,
    cursor: Option<Cursor>,
) -> Result<Page, DbError> {
    let limit = limit.clamp(MIN_LIMIT, MAX_LIMIT);
    let rows = store.list_wishes(limit, cursor).await?;
    Ok(Page::from_rows(rows, limit))
}
