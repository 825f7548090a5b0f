use serde::{Deserialize, Serialize};

use crate::models::Wish;

// -- Wishes --

/// Query string of `GET /`. Every field stays a raw string so that malformed
/// values are normalized by the handler instead of rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct ListWishesQuery {
    pub limit: Option<String>,
    pub cursor: Option<String>,
    /// Alias for `cursor`.
    pub before: Option<String>,
    pub ping: Option<String>,
}

impl ListWishesQuery {
    /// `cursor` wins over `before` when both are given.
    pub fn cursor_token(&self) -> Option<&str> {
        self.cursor.as_deref().or(self.before.as_deref())
    }

    pub fn is_ping(&self) -> bool {
        matches!(self.ping.as_deref(), Some(p) if !p.is_empty() && p != "0" && p != "false")
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateWishRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl CreateWishRequest {
    /// Read each field on its own: a field that is not a string is treated as
    /// absent without discarding the others.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let field = |key: &str| value.get(key).and_then(serde_json::Value::as_str).map(str::to_owned);
        Self {
            name: field("name"),
            message: field("message"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateWishResponse {
    pub wish: Wish,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishPage {
    pub wishes: Vec<Wish>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

// -- Health --

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub ok: bool,
    pub db: String,
    pub schema: String,
    pub wishes_table: bool,
    pub count: i64,
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
