//! Response shapes shared by all handlers.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Single error shape: `{"error": "<message>"}`.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// 418 short-circuit for the `coffee: teapot` sentinel.
pub fn teapot() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::IM_A_TEAPOT,
        Json(ErrorBody {
            error: "I'm a teapot".to_string(),
        }),
    )
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<Vec<T>>) {
    (StatusCode::OK, Json(data))
}

/// Downloadable payload with a content type and attachment filename.
pub fn attachment(body: impl Into<axum::body::Body>, content_type: &'static str, filename: &str) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", filename.replace('"', ""));
    let body: axum::body::Body = body.into();
    let mut resp = (StatusCode::OK, body).into_response();
    let headers = resp.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    if let Ok(v) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, v);
    }
    resp
}
