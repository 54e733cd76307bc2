//! CSV-to-table loader: derive a table name from the origin file name, create one TEXT column
//! per sanitized header cell, and insert every non-empty row normalized to the header width.

use crate::error::LoadError;
use crate::sql::{create_table, drop_table, ensure_identifier, insert_row};
use crate::store::{dump_sql, export_database, open_memory_store};
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

const BOM: char = '\u{feff}';

/// Result of a completed load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoadedTable {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: u64,
    /// Rows whose field count differed from the header and were padded or truncated.
    pub normalized_rows: u64,
}

/// Table name from the final path segment of `origin`, without extension or leading BOM.
pub fn derive_table_name(origin: &str) -> Result<String, LoadError> {
    let stem = Path::new(origin)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = stem.trim_start_matches(BOM);
    ensure_identifier(stem, "table").map(str::to_string)
}

/// Trim each header cell, drop a leading BOM, and require a valid column identifier.
/// Names that collide case-insensitively are rejected, as SQLite would refuse the table.
pub fn sanitize_headers<'a, I>(cells: I) -> Result<Vec<String>, LoadError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for cell in cells {
        let name = cell.trim().trim_start_matches(BOM);
        let name = ensure_identifier(name, "column")?;
        if !seen.insert(name.to_ascii_lowercase()) {
            return Err(LoadError::DuplicateColumn(name.to_string()));
        }
        columns.push(name.to_string());
    }
    Ok(columns)
}

/// Fit a row to `width` fields: extra fields dropped, missing ones filled with "".
/// Returns true when the row had to be changed.
pub fn normalize_row(fields: &mut Vec<String>, width: usize) -> bool {
    if fields.len() == width {
        return false;
    }
    fields.resize(width, String::new());
    true
}

fn csv_reader(source: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source.as_bytes())
}

/// Load `source` into the table derived from `origin`, replacing any table of that name.
/// Drop, create, and every insert run in one transaction that commits once at the end.
pub async fn load_csv(pool: &SqlitePool, source: &str, origin: &str) -> Result<LoadedTable, LoadError> {
    let table = derive_table_name(origin)?;

    let mut reader = csv_reader(source);
    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => record?,
        None => return Err(LoadError::EmptyInput),
    };
    let columns = sanitize_headers(header.iter())?;
    let width = columns.len();

    let insert_sql = insert_row(&table, &columns);
    let mut tx = pool.begin().await?;
    sqlx::query(&drop_table(&table)).execute(&mut *tx).await?;
    sqlx::query(&create_table(&table, &columns)).execute(&mut *tx).await?;
    debug!(table = %table, columns = width, "table created");

    let mut rows = 0u64;
    let mut normalized_rows = 0u64;
    for record in records {
        let record = record?;
        if record.is_empty() {
            continue;
        }
        let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
        if normalize_row(&mut fields, width) {
            normalized_rows += 1;
        }
        let mut query = sqlx::query(&insert_sql);
        for field in fields {
            query = query.bind(field);
        }
        query.execute(&mut *tx).await?;
        rows += 1;
    }
    tx.commit().await?;

    if normalized_rows > 0 {
        warn!(table = %table, normalized = normalized_rows, "rows padded or truncated to header width");
    }
    info!(table = %table, rows, "csv loaded");
    Ok(LoadedTable {
        table,
        columns,
        rows,
        normalized_rows,
    })
}

/// Read a UTF-8 CSV file and load it into `pool` under the name derived from its path.
pub async fn load_file(pool: &SqlitePool, csv_path: impl AsRef<Path>) -> Result<LoadedTable, LoadError> {
    let csv_path = csv_path.as_ref();
    let source = tokio::fs::read_to_string(csv_path).await?;
    load_csv(pool, &source, &csv_path.to_string_lossy()).await
}

/// Load into a throwaway in-memory store and return its SQL dump.
pub async fn convert_to_dump(source: &str, origin: &str) -> Result<(LoadedTable, String), LoadError> {
    let pool = open_memory_store().await?;
    let loaded = load_csv(&pool, source, origin).await?;
    let dump = dump_sql(&pool).await?;
    pool.close().await;
    Ok((loaded, dump))
}

/// Load into a throwaway in-memory store and return it as SQLite database file bytes.
pub async fn convert_to_database(source: &str, origin: &str) -> Result<(LoadedTable, Vec<u8>), LoadError> {
    let pool = open_memory_store().await?;
    let loaded = load_csv(&pool, source, origin).await?;
    let bytes = export_database(&pool).await?;
    pool.close().await;
    Ok((loaded, bytes))
}
