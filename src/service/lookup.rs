//! Lookup execution against SQLite.

use crate::config::LookupTables;
use crate::error::LookupError;
use crate::service::{LookupQuery, LookupRequest, Validated};
use crate::sql::select_measures_for_zip;
use serde::Serialize;
use sqlx::SqlitePool;

/// One joined row. Field order is the response key order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct MeasureRecord {
    pub state: Option<String>,
    pub county: Option<String>,
    pub state_code: Option<String>,
    pub county_code: Option<String>,
    pub year_span: Option<String>,
    pub measure_name: Option<String>,
    pub measure_id: Option<String>,
    pub numerator: Option<String>,
    pub denominator: Option<String>,
    pub raw_value: Option<String>,
    pub confidence_interval_lower_bound: Option<String>,
    pub confidence_interval_upper_bound: Option<String>,
    pub data_release_year: Option<String>,
    pub fipscode: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupOutcome {
    Teapot,
    Found(Vec<MeasureRecord>),
}

pub struct LookupService;

impl LookupService {
    /// Run the join for a validated query. No rows is `NotFound`.
    pub async fn lookup(
        pool: &SqlitePool,
        tables: &LookupTables,
        query: &LookupQuery,
    ) -> Result<Vec<MeasureRecord>, LookupError> {
        let q = select_measures_for_zip(tables, &query.zip, &query.measure_name);
        tracing::debug!(sql = %q.sql, "query");
        let mut stmt = sqlx::query_as::<_, MeasureRecord>(&q.sql);
        for p in &q.params {
            stmt = stmt.bind(p);
        }
        let records = stmt.fetch_all(pool).await?;
        if records.is_empty() {
            return Err(LookupError::NotFound);
        }
        tracing::info!(zip = %query.zip, measure = %query.measure, rows = records.len(), "lookup");
        Ok(records)
    }

    /// Whole pipeline from an already decoded request.
    pub async fn handle(
        pool: &SqlitePool,
        tables: &LookupTables,
        request: &LookupRequest,
    ) -> Result<LookupOutcome, LookupError> {
        match request.validate()? {
            Validated::Teapot => Ok(LookupOutcome::Teapot),
            Validated::Query(query) => Self::lookup(pool, tables, &query).await.map(LookupOutcome::Found),
        }
    }

    /// Whole pipeline from raw body bytes.
    pub async fn handle_body(
        pool: &SqlitePool,
        tables: &LookupTables,
        body: &[u8],
    ) -> Result<LookupOutcome, LookupError> {
        let request = LookupRequest::from_body(body)?;
        Self::handle(pool, tables, &request).await
    }
}
