//! Error handling

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::inference::ModelError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Request errors
    ValidationError(String),
    MalformedJson(String),
    UnsupportedMediaType(String),
    NotFound(String),

    // Generic errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, detail) = match &self {
            AppError::ValidationError(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "Request validation failed", Some(msg.as_str()))
            }
            AppError::MalformedJson(msg) => {
                (StatusCode::BAD_REQUEST, "Malformed JSON body", Some(msg.as_str()))
            }
            AppError::UnsupportedMediaType(msg) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Expected application/json", Some(msg.as_str()))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.as_str(), None),
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", None)
            }
        };

        let body = match detail {
            Some(detail) => json!({
                "error": error_message,
                "status": status.as_u16(),
                "detail": detail,
            }),
            None => json!({
                "error": error_message,
                "status": status.as_u16(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => AppError::ValidationError(e.body_text()),
            JsonRejection::JsonSyntaxError(e) => AppError::MalformedJson(e.body_text()),
            JsonRejection::MissingJsonContentType(e) => AppError::UnsupportedMediaType(e.body_text()),
            other => AppError::MalformedJson(other.body_text()),
        }
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        AppError::InternalError(err.to_string())
    }
}
