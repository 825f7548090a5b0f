use axum::{
    Json,
    body::Bytes,
    extract::{
        Query, State,
        rejection::{BytesRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, info};

use guestbook_db::{WishStore, clamp_limit, fetch_page, parse_cursor};
use guestbook_types::api::{
    CreateWishRequest, CreateWishResponse, HealthResponse, ListWishesQuery, WishPage,
};
use guestbook_types::models::NewWish;
use guestbook_types::{MESSAGE_MAX_CHARS, NAME_MAX_CHARS};

use crate::error::ApiError;
use crate::sanitize::sanitize;
use crate::state::AppState;

/// GET — one page of wishes, newest first, or the database health probe when
/// `ping` is set.
pub async fn list_wishes(
    State(state): State<AppState>,
    query: Result<Query<ListWishesQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let query = match query {
        Ok(Query(query)) => query,
        Err(e) => {
            debug!("Unparseable query string, using defaults: {}", e);
            ListWishesQuery::default()
        }
    };

    let mut store = state.acquire().await?;
    let result = if query.is_ping() {
        ping(store.as_ref()).await
    } else {
        list_page(store.as_ref(), &query).await
    };
    store.close().await;

    result
}

async fn list_page(store: &dyn WishStore, query: &ListWishesQuery) -> Result<Response, ApiError> {
    let limit = clamp_limit(query.limit.as_deref());
    let cursor = parse_cursor(query.cursor_token());

    let page = fetch_page(store, limit, cursor).await?;
    debug!(
        "Listed {} wishes (limit {}, has_more {})",
        page.wishes.len(),
        limit,
        page.has_more
    );

    Ok(Json(WishPage {
        wishes: page.wishes,
        next_cursor: page.next_cursor,
        has_more: page.has_more,
    })
    .into_response())
}

async fn ping(store: &dyn WishStore) -> Result<Response, ApiError> {
    let stats = store.health().await?;
    Ok(Json(HealthResponse {
        ok: true,
        db: stats.database,
        schema: stats.schema,
        wishes_table: stats.wishes_table,
        count: stats.count,
    })
    .into_response())
}

/// POST — sign the guestbook. The body is read leniently: each field that is
/// not a JSON string counts as missing.
pub async fn create_wish(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = body?;
    let value: serde_json::Value = serde_json::from_slice(&body).unwrap_or_else(|e| {
        debug!("Unreadable wish body, treating as empty: {}", e);
        serde_json::Value::Null
    });
    let req = CreateWishRequest::from_value(&value);

    let wish = NewWish {
        name: sanitize(req.name.as_deref().unwrap_or_default(), NAME_MAX_CHARS),
        message: sanitize(req.message.as_deref().unwrap_or_default(), MESSAGE_MAX_CHARS),
    };
    if wish.message.is_empty() {
        return Err(ApiError::Validation("Message is required".into()));
    }

    let mut store = state.acquire().await?;
    let result = store.insert_wish(&wish).await;
    store.close().await;
    let wish = result?;

    info!("New wish {} from {:?}", wish.id, wish.name);
    Ok((StatusCode::CREATED, Json(CreateWishResponse { wish })))
}

/// OPTIONS — CORS preflight. The headers come from the router's layers.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Liveness probe for the hosting platform. Does not touch the database.
pub async fn health() -> Json<&'static str> {
    Json("ok")
}
