use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::services::AppState;

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut status = "healthy";
    let mut dependencies = serde_json::Map::new();

    // Check the question data directory
    let data_dir_ok = tokio::fs::metadata(&state.config.data_dir)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    dependencies.insert(
        "question_store".to_string(),
        json!({
            "status": if data_dir_ok { "healthy" } else { "unhealthy" },
            "path": state.config.data_dir.display().to_string(),
            "subjects": state.subjects.len(),
        }),
    );
    if !data_dir_ok {
        status = "degraded";
    }

    let status_code = if data_dir_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(json!({
            "status": status,
            "service": "quizhub-api",
            "version": env!("CARGO_PKG_VERSION"),
            "dependencies": dependencies
        })),
    )
}

pub mod auth;
pub mod quiz;
