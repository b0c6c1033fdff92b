//! Welcome handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome to the diabetes prediction API";

#[derive(Serialize)]
pub struct WelcomeResponse {
    message: &'static str,
    api_secret_loaded: String,
}

pub async fn welcome(State(state): State<AppState>) -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE,
        api_secret_loaded: state.config.api_secret.clone(),
    })
}
