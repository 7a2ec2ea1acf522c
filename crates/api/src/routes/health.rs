use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::ApiState;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    storage: String,
}

#[derive(Serialize)]
struct VersionResponse {
    version: String,
}

/// Reports `ok` when a unit of work can be opened against storage.
async fn health_check(State(state): State<Arc<ApiState>>) -> (StatusCode, Json<HealthResponse>) {
    match state.storage.begin().await {
        Ok(_uow) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                storage: "ok".to_string(),
            }),
        ),
        Err(err) => {
            warn!(error = %err, "health check could not reach storage");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded".to_string(),
                    storage: "unavailable".to_string(),
                }),
            )
        }
    }
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
}
