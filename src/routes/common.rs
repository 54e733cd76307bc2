//! Common routes: health, readiness, version.

use crate::state::AppState;
use crate::store::table_names;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    database: &'static str,
    /// Lookup tables not present in the store.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    missing_tables: Vec<String>,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

/// Ready when the store answers and both lookup tables exist.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyBody>) {
    let tables = match table_names(&state.pool).await {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!(error = %e, "readiness probe failed");
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyBody {
                    status: "degraded",
                    database: "unavailable",
                    missing_tables: Vec::new(),
                }),
            );
        }
    };
    let lookup = &state.settings.tables;
    let missing_tables: Vec<String> = [&lookup.zip_table, &lookup.measure_table]
        .into_iter()
        .filter(|name| !tables.contains(name))
        .cloned()
        .collect();
    let status = if missing_tables.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let body = ReadyBody {
        status: if status.is_success() { "ok" } else { "degraded" },
        database: "ok",
        missing_tables,
    };
    (status, Json(body))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /health, GET /ready, GET /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
