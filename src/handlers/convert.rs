//! CSV conversion handlers: multipart upload to a SQLite file, JSON body to a SQL dump.

use crate::error::AppError;
use crate::loader::{convert_to_database, convert_to_dump};
use crate::response::attachment;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Json};
use axum::response::Response;
use serde::Deserialize;

const UPLOAD_FIELD: &str = "csv_file";

struct Upload {
    filename: String,
    content: Vec<u8>,
}

async fn read_upload(multipart: &mut Multipart) -> Result<Option<Upload>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::from_rejection(e.status(), e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("").to_string();
        let content = field
            .bytes()
            .await
            .map_err(|e| AppError::from_rejection(e.status(), e.body_text()))?;
        return Ok(Some(Upload {
            filename,
            content: content.to_vec(),
        }));
    }
    Ok(None)
}

/// POST /convert: multipart form with a `csv_file` field; responds with the database file.
pub async fn convert_upload(multipart: Result<Multipart, MultipartRejection>) -> Result<Response, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::from_rejection(e.status(), e.body_text()))?;
    let upload = read_upload(&mut multipart)
        .await?
        .ok_or_else(|| AppError::BadRequest("No file uploaded".into()))?;
    if upload.filename.is_empty() {
        return Err(AppError::BadRequest("No file selected".into()));
    }
    if !upload.filename.to_lowercase().ends_with(".csv") {
        return Err(AppError::BadRequest("File must be a CSV".into()));
    }
    let source = String::from_utf8(upload.content)
        .map_err(|_| AppError::BadRequest("File must be UTF-8 encoded".into()))?;

    let (loaded, bytes) = convert_to_database(&source, &upload.filename).await?;
    tracing::info!(table = %loaded.table, rows = loaded.rows, "upload converted");
    Ok(attachment(bytes, "application/x-sqlite3", &format!("{}.db", loaded.table)))
}

#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    /// Absent, null, and empty all mean no content.
    #[serde(default)]
    pub csv_content: Option<String>,
    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_filename() -> String {
    "data.csv".into()
}

/// POST /csv-converter: `{"csv_content": "...", "filename": "people.csv"}`; responds with a SQL dump.
pub async fn convert_json(payload: Result<Json<ConvertRequest>, JsonRejection>) -> Result<Response, AppError> {
    let Json(req) = payload.map_err(|e| AppError::from_rejection(e.status(), e.body_text()))?;
    let csv_content = req
        .csv_content
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("No CSV content provided".into()))?;
    let (loaded, dump) = convert_to_dump(&csv_content, &req.filename).await?;
    tracing::info!(table = %loaded.table, rows = loaded.rows, "csv converted to dump");
    Ok(attachment(dump, "application/sql", &format!("{}.sql", loaded.table)))
}
