//! County data lookup handler and the service info document.

use crate::error::AppError;
use crate::extractors::content_type::JsonContentType;
use crate::response::{success_many, teapot};
use crate::service::{LookupOutcome, LookupService, Measure};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::{IntoResponse, Response},
    Json,
};

/// POST /county_data: `{"zip": "02138", "measure_name": "Adult obesity"}`.
pub async fn county_data(
    _json: JsonContentType,
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let body = body.map_err(|e| AppError::from_rejection(e.status(), e.body_text()))?;
    let outcome = LookupService::handle_body(&state.pool, &state.settings.tables, &body).await?;
    Ok(match outcome {
        LookupOutcome::Teapot => teapot().into_response(),
        LookupOutcome::Found(records) => success_many(records).into_response(),
    })
}

/// GET / and GET /county_data.
pub async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "County Health Data API",
        "endpoints": {
            "POST /county_data": "Get county health data by ZIP code and measure name",
            "POST /convert": "Convert an uploaded CSV file (multipart field csv_file) to a SQLite database",
            "POST /csv-converter": "Convert CSV content ({csv_content, filename}) to a SQL dump"
        },
        "required_parameters": ["zip", "measure_name"],
        "valid_measures": Measure::labels(),
    }))
}
