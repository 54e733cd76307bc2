//! Route tables and the assembled application router.

pub mod common;
pub mod convert;
pub mod lookup;

pub use common::common_routes;
pub use convert::convert_routes;
pub use lookup::lookup_routes;

use crate::error::AppError;
use crate::handlers::not_found;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

/// The body limit layer answers an oversized `Content-Length` itself with plain text.
/// Rewrite that into the JSON error shape.
async fn json_payload_too_large(resp: Response) -> Response {
    let is_json = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if resp.status() == StatusCode::PAYLOAD_TOO_LARGE && !is_json {
        return AppError::PayloadTooLarge.into_response();
    }
    resp
}

/// Every route, the JSON 404 fallback, and the request body limit from settings.
pub fn app(state: AppState) -> Router {
    let limit = state.settings.max_upload_bytes;
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(lookup_routes(state.clone()))
        .merge(convert_routes())
        .fallback(not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(limit))
        .layer(middleware::map_response(json_payload_too_large))
}
