//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::path::PathBuf;
use thiserror::Error;

use crate::response::ErrorBody;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Env { key: &'static str, message: String },
    #[error("validation: {0}")]
    Validation(String),
}

/// Failures opening, dumping, or exporting a store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database not found: {0}")]
    NotFound(PathBuf),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

/// Failures of the CSV-to-table loader. All are terminal for the load.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Invalid {kind} name: {name}")]
    Naming { kind: &'static str, name: String },
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),
    #[error("CSV file is empty.")]
    EmptyInput,
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("database: {0}")]
    Storage(#[from] sqlx::Error),
}

impl From<StoreError> for LoadError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(path) => LoadError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("database not found: {}", path.display()),
            )),
            StoreError::Io(e) => LoadError::Io(e),
            StoreError::Db(e) => LoadError::Storage(e),
        }
    }
}

/// Failures of the lookup pipeline, in the order the checks run.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("{0}")]
    MalformedBody(String),
    #[error("Both 'zip' and 'measure_name' are required (missing: {})", .0.join(", "))]
    MissingField(Vec<&'static str>),
    #[error("ZIP code must be exactly 5 digits")]
    InvalidZip,
    #[error("Invalid measure_name. Must be one of: {}", crate::service::Measure::labels().join(", "))]
    InvalidMeasure,
    #[error("No data found for the specified ZIP code and measure")]
    NotFound,
    #[error("database: {0}")]
    Storage(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("{0}")]
    BadRequest(String),
    #[error("Endpoint not found")]
    RouteNotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Content-Type must be application/json")]
    UnsupportedMediaType,
    #[error("Request body too large")]
    PayloadTooLarge,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) | AppError::Store(_) | AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Load(LoadError::Storage(_) | LoadError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Load(_) => StatusCode::BAD_REQUEST,
            AppError::Lookup(e) => match e {
                LookupError::NotFound => StatusCode::NOT_FOUND,
                LookupError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            },
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Body extraction failure: 413 when the body limit tripped, 400 otherwise.
    pub fn from_rejection(status: StatusCode, message: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::BadRequest(message)
        }
    }

    /// Message sent to the client. Engine failures are logged and replaced by a generic message.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Db(_)
            | AppError::Store(_)
            | AppError::Load(LoadError::Storage(_))
            | AppError::Lookup(LookupError::Storage(_)) => "Database error".to_string(),
            AppError::Config(_) | AppError::Load(LoadError::Io(_)) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        let body = ErrorBody {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}
