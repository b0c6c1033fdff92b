//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::inference::ModelInfo;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    model: ModelInfo,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        model: state.model.info().clone(),
    })
}
