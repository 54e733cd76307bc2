//! CSV conversion routes. Stateless: each request gets its own in-memory store.

use crate::handlers::{convert_json, convert_upload, method_not_allowed};
use axum::{routing::post, Router};

pub fn convert_routes() -> Router {
    Router::new()
        .route("/convert", post(convert_upload).fallback(method_not_allowed))
        .route("/csv-converter", post(convert_json).fallback(method_not_allowed))
}
