use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single guestbook entry as stored and as returned to clients.
///
/// Rows are totally ordered by `(created_at DESC, id DESC)`; `id` breaks ties
/// between rows inserted within the same timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wish {
    pub id: i64,
    pub name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// An already-sanitized wish waiting to be inserted. Storage assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWish {
    pub name: String,
    pub message: String,
}
