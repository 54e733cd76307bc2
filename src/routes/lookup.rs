//! Lookup routes: service info and the county data endpoint.

use crate::handlers::{county_data, index, method_not_allowed};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn lookup_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).fallback(method_not_allowed))
        .route(
            "/county_data",
            post(county_data).get(index).fallback(method_not_allowed),
        )
        .with_state(state)
}
