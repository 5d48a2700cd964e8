use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use service::errors::ServiceError;
use thiserror::Error;

/// Errors returned to HTTP clients. Messages are fixed strings; the underlying
/// cause is logged by the service layer and never echoed back.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing data.")]
    MissingData,
    #[error("Failed to save timer.")]
    SaveFailed,
    #[error("Reset failed.")]
    ResetFailed,
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(_) => ApiError::MissingData,
            ServiceError::Persistence(_) => ApiError::SaveFailed,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let msg = self.to_string();
        match self {
            ApiError::MissingData => (StatusCode::BAD_REQUEST, Json(json!({"error": msg}))).into_response(),
            ApiError::SaveFailed => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": msg}))).into_response(),
            ApiError::ResetFailed => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"ok": false, "error": msg}))).into_response()
            }
        }
    }
}
