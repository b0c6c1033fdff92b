//! HTTP handlers

pub mod root;
pub mod health;
pub mod predict;

use axum::extract::FromRequest;
use axum::http::Uri;

use crate::AppError;

/// JSON extractor whose rejections are rendered as [`AppError`]
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
