//! HTTP handlers: thin adapters between axum and the loader/lookup core.

pub mod convert;
pub mod lookup;
pub use convert::*;
pub use lookup::*;

use crate::error::AppError;

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub async fn not_found() -> AppError {
    AppError::RouteNotFound
}
