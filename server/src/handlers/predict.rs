//! Prediction handler

use axum::{extract::State, Json};

use super::AppJson;
use crate::models::{DiabetesInput, PredictionResponse};
use crate::{AppResult, AppState};

/// Run the loaded model on one validated input row
pub async fn predict(
    State(state): State<AppState>,
    AppJson(input): AppJson<DiabetesInput>,
) -> AppResult<Json<PredictionResponse>> {
    let row = input.to_row();
    let prediction = state.model.predict(&row)?;

    tracing::debug!("Prediction {} for {:?}", prediction, input);

    Ok(Json(PredictionResponse { prediction }))
}
