//! Reject lookup requests whose Content-Type is not JSON before the body is read.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::CONTENT_TYPE, request::Parts},
};

/// Marker extractor: succeeds only for `application/json` (parameters such as charset allowed).
#[derive(Clone, Copy, Debug)]
pub struct JsonContentType;

pub fn is_json_content_type(value: &str) -> bool {
    let mime = value.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

#[async_trait]
impl<S> FromRequestParts<S> for JsonContentType
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ok = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(is_json_content_type)
            .unwrap_or(false);
        if ok {
            Ok(JsonContentType)
        } else {
            Err(AppError::UnsupportedMediaType)
        }
    }
}
