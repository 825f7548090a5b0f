pub mod error;
pub mod sanitize;
pub mod state;
pub mod wishes;

use axum::{
    Router,
    http::{HeaderValue, header},
    routing::get,
};
use tower_http::set_header::SetResponseHeaderLayer;

pub use error::ApiError;
pub use state::{AppState, AppStateInner};

/// The whole HTTP surface. The wishes endpoint is mounted at `/` and, for
/// deployments behind a path-prefixed proxy, at `/api/wishes`.
pub fn router(state: AppState) -> Router {
    let wishes_endpoint = get(wishes::list_wishes)
        .post(wishes::create_wish)
        .options(wishes::preflight)
        .fallback(wishes::method_not_allowed);

    Router::new()
        .route("/", wishes_endpoint.clone())
        .route("/api/wishes", wishes_endpoint)
        .route("/health", get(wishes::health))
        .fallback(wishes::not_found)
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .with_state(state)
}
